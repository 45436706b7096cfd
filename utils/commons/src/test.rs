use concordium_std::concordium_cfg_test;

#[concordium_cfg_test]
pub use inner::*;

#[concordium_cfg_test]
mod inner {
    use concordium_std::test_infrastructure::MockFn;
    use concordium_std::*;

    /// Mock that accepts any parameter parsing as `D` and answers with `return_value`.
    pub fn parse_and_ok_mock<D: Deserial, S>(
        return_value: impl Clone + Serial + 'static,
    ) -> MockFn<S> {
        MockFn::new(move |parameter, _amount, _balance, _state| {
            if D::deserial(&mut Cursor::new(parameter)).is_err() {
                return Err(CallContractError::Trap);
            }
            Ok((false, Some(return_value.clone())))
        })
    }

    /// Mock that traps unless the parsed parameter passes `check`.
    pub fn parse_and_check_mock<D: Deserial, S>(
        check: impl Fn(&D) -> bool + 'static,
        return_value: impl Clone + Serial + 'static,
    ) -> MockFn<S> {
        MockFn::new(move |parameter, _, _, _state| {
            let value = match D::deserial(&mut Cursor::new(parameter)) {
                Ok(value) => value,
                Err(_) => return Err(CallContractError::Trap),
            };
            if !check(&value) {
                return Err(CallContractError::Trap);
            };
            Ok((false, Some(return_value.clone())))
        })
    }
}
