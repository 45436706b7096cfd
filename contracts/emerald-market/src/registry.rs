//! In-memory CIS-2 token contract used to drive the marketplace in tests.
use concordium_std::concordium_cfg_test;

#[concordium_cfg_test]
pub use inner::*;

#[concordium_cfg_test]
mod inner {
    extern crate std;

    use commons::{
        ContractBalanceOfQueryParams, ContractBalanceOfQueryResponse, ContractTokenAmount,
        ContractTokenId, TransferParameter,
    };
    use concordium_cis2::{OperatorOfQueryParams, OperatorOfQueryResponse, Receiver};
    use concordium_std::test_infrastructure::MockFn;
    use concordium_std::*;
    use std::{cell::RefCell, rc::Rc};

    #[derive(Default)]
    struct Ledger {
        holders: Vec<(ContractTokenId, Address)>,
        operators: Vec<(Address, Address)>,
    }

    /// Holders and operators of a single token contract.
    ///
    /// Clones share one ledger, so a test keeps a handle to it while the mocks
    /// installed on the host move tokens around.
    #[derive(Clone, Default)]
    pub struct MockRegistry {
        ledger: Rc<RefCell<Ledger>>,
    }

    impl MockRegistry {
        /// Make `owner` the only holder of `token_id`.
        pub fn mint(&self, token_id: ContractTokenId, owner: Address) {
            let mut ledger = self.ledger.borrow_mut();
            ledger.holders.retain(|(id, _)| *id != token_id);
            ledger.holders.push((token_id, owner));
        }

        pub fn holder_of(&self, token_id: &ContractTokenId) -> Option<Address> {
            self.ledger
                .borrow()
                .holders
                .iter()
                .find(|(id, _)| id == token_id)
                .map(|(_, owner)| *owner)
        }

        pub fn update_operator(&self, owner: Address, operator: Address, enabled: bool) {
            let mut ledger = self.ledger.borrow_mut();
            ledger
                .operators
                .retain(|(o, op)| !(*o == owner && *op == operator));
            if enabled {
                ledger.operators.push((owner, operator));
            }
        }

        pub fn is_operator(&self, owner: &Address, operator: &Address) -> bool {
            owner == operator
                || self
                    .ledger
                    .borrow()
                    .operators
                    .iter()
                    .any(|(o, op)| o == owner && op == operator)
        }

        fn move_token(
            &self,
            token_id: &ContractTokenId,
            from: Address,
            to: Address,
            sender: &Address,
        ) -> bool {
            if self.holder_of(token_id) != Some(from) || !self.is_operator(&from, sender) {
                return false;
            }
            self.mint(token_id.clone(), to);
            true
        }

        /// `balanceOf`: one unit for the holder, zero for everyone else.
        pub fn balance_of_mock<S>(&self) -> MockFn<S> {
            let registry = self.clone();
            MockFn::new(move |parameter, _, _, _state| {
                let params = match ContractBalanceOfQueryParams::deserial(&mut Cursor::new(parameter))
                {
                    Ok(params) => params,
                    Err(_) => return Err(CallContractError::Trap),
                };

                let balances: Vec<ContractTokenAmount> = params
                    .queries
                    .iter()
                    .map(|query| {
                        let held = registry.holder_of(&query.token_id) == Some(query.address);
                        ContractTokenAmount::from(if held { 1 } else { 0 })
                    })
                    .collect();

                Ok((false, Some(ContractBalanceOfQueryResponse::from(balances))))
            })
        }

        /// `operatorOf` answered from the ledger.
        pub fn operator_of_mock<S>(&self) -> MockFn<S> {
            let registry = self.clone();
            MockFn::new(move |parameter, _, _, _state| {
                let params = match OperatorOfQueryParams::deserial(&mut Cursor::new(parameter)) {
                    Ok(params) => params,
                    Err(_) => return Err(CallContractError::Trap),
                };

                let answers: Vec<bool> = params
                    .queries
                    .iter()
                    .map(|query| registry.is_operator(&query.owner, &query.address))
                    .collect();

                Ok((false, Some(OperatorOfQueryResponse::from(answers))))
            })
        }

        /// `transfer` invoked by `sender`. Traps when `sender` may not move the
        /// token or when `check` rejects the state of the invoking contract.
        pub fn transfer_mock<S>(
            &self,
            sender: Address,
            check: impl Fn(&S) -> bool + 'static,
        ) -> MockFn<S> {
            let registry = self.clone();
            MockFn::new(move |parameter, _, _, state| {
                let params = match TransferParameter::deserial(&mut Cursor::new(parameter)) {
                    Ok(params) => params,
                    Err(_) => return Err(CallContractError::Trap),
                };

                if !check(state) {
                    return Err(CallContractError::Trap);
                }

                for transfer in params.0 {
                    let to = match transfer.to {
                        Receiver::Account(account) => Address::Account(account),
                        Receiver::Contract(contract, _) => Address::Contract(contract),
                    };
                    if !registry.move_token(&transfer.token_id, transfer.from, to, &sender) {
                        return Err(CallContractError::Trap);
                    }
                }

                Ok((false, None::<()>))
            })
        }
    }
}
