use super::*;

/// Queries and transfers against a CIS-2 token contract.
///
/// Implemented for every host, so a contract can ask the token contract about
/// holdership and operator rights, and move a token on behalf of its owner.
pub trait HostCis2Ext<T>: HasHost<T> {
    /// Balance of `address` for a single token.
    fn cis2_balance_of(
        &self,
        contract: &ContractAddress,
        token_id: ContractTokenId,
        address: Address,
    ) -> Result<ContractTokenAmount, ContractReadError<Self::ReturnValueType>> {
        let parameter = ContractBalanceOfQueryParams {
            queries: vec![BalanceOfQuery { token_id, address }],
        };

        let mut result = self
            .invoke_contract_read_only(
                contract,
                &parameter,
                EntrypointName::new_unchecked(BALANCE_OF_ENTRYPOINT),
                Amount::zero(),
            )
            .map_err(ContractReadError::Call)?
            .ok_or(ContractReadError::Compatibility)?;

        let response = ContractBalanceOfQueryResponse::deserial(&mut result)
            .map_err(|_| ContractReadError::Parse)?;

        response
            .0
            .into_iter()
            .next()
            .ok_or(ContractReadError::Compatibility)
    }

    /// Whether `address` holds the token, i.e. has a non-zero balance of it.
    fn cis2_is_holder(
        &self,
        contract: &ContractAddress,
        token_id: ContractTokenId,
        address: Address,
    ) -> Result<bool, ContractReadError<Self::ReturnValueType>> {
        let balance = self.cis2_balance_of(contract, token_id, address)?;
        Ok(balance != ContractTokenAmount::from(0))
    }

    /// Whether `address` is an operator of `owner` on the token contract.
    fn cis2_operator_of(
        &self,
        contract: &ContractAddress,
        owner: Address,
        address: Address,
    ) -> Result<bool, ContractReadError<Self::ReturnValueType>> {
        let parameter = OperatorOfQueryParams {
            queries: vec![OperatorOfQuery { owner, address }],
        };

        let mut result = self
            .invoke_contract_read_only(
                contract,
                &parameter,
                EntrypointName::new_unchecked(OPERATOR_OF_ENTRYPOINT),
                Amount::zero(),
            )
            .map_err(ContractReadError::Call)?
            .ok_or(ContractReadError::Compatibility)?;

        let response =
            OperatorOfQueryResponse::deserial(&mut result).map_err(|_| ContractReadError::Parse)?;

        response
            .0
            .into_iter()
            .next()
            .ok_or(ContractReadError::Compatibility)
    }

    /// Move a single token from `from` to the account `to`.
    ///
    /// The caller has to be `from` or one of its operators, otherwise the token
    /// contract rejects.
    fn cis2_transfer(
        &mut self,
        contract: &ContractAddress,
        token_id: ContractTokenId,
        from: Address,
        to: AccountAddress,
    ) -> Result<(), CallContractError<Self::ReturnValueType>> {
        let transfer = Transfer {
            token_id,
            amount: ContractTokenAmount::from(1),
            from,
            to: Receiver::from_account(to),
            data: AdditionalData::empty(),
        };

        self.invoke_contract(
            contract,
            &TransferParams(vec![transfer]),
            EntrypointName::new_unchecked(TRANSFER_ENTRYPOINT),
            Amount::zero(),
        )?;

        Ok(())
    }
}

impl<T, H: HasHost<T>> HostCis2Ext<T> for H {}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::test::*;
    use concordium_std::test_infrastructure::*;

    const NFT_CONTRACT: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };

    const MARKET: ContractAddress = ContractAddress {
        index: 2,
        subindex: 0,
    };

    const USER_1: AccountAddress = AccountAddress([1; 32]);
    const USER_2: AccountAddress = AccountAddress([2; 32]);

    fn token_id() -> ContractTokenId {
        TokenIdVec(vec![0])
    }

    fn empty_host() -> TestHost<()> {
        TestHost::new((), TestStateBuilder::new())
    }

    #[concordium_test]
    fn test_balance_of() {
        let mut host = empty_host();
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked(BALANCE_OF_ENTRYPOINT.into()),
            parse_and_check_mock::<ContractBalanceOfQueryParams, _>(
                |params| {
                    params.queries.len() == 1
                        && params.queries[0].token_id == token_id()
                        && params.queries[0].address == Address::Account(USER_1)
                },
                ContractBalanceOfQueryResponse::from(vec![ContractTokenAmount::from(1)]),
            ),
        );

        let result = host.cis2_is_holder(&NFT_CONTRACT, token_id(), Address::Account(USER_1));
        claim!(matches!(result, Ok(true)));
    }

    #[concordium_test]
    fn test_zero_balance_is_not_holder() {
        let mut host = empty_host();
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked(BALANCE_OF_ENTRYPOINT.into()),
            parse_and_ok_mock::<ContractBalanceOfQueryParams, _>(
                ContractBalanceOfQueryResponse::from(vec![ContractTokenAmount::from(0)]),
            ),
        );

        let result = host.cis2_is_holder(&NFT_CONTRACT, token_id(), Address::Account(USER_2));
        claim!(matches!(result, Ok(false)));
    }

    #[concordium_test]
    fn test_operator_of() {
        let mut host = empty_host();
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked(OPERATOR_OF_ENTRYPOINT.into()),
            parse_and_check_mock::<OperatorOfQueryParams, _>(
                |params| {
                    params.queries.len() == 1
                        && params.queries[0].owner == Address::Account(USER_1)
                        && params.queries[0].address == Address::Contract(MARKET)
                },
                OperatorOfQueryResponse::from(vec![true]),
            ),
        );

        let result = host.cis2_operator_of(
            &NFT_CONTRACT,
            Address::Account(USER_1),
            Address::Contract(MARKET),
        );
        claim!(matches!(result, Ok(true)));
    }

    #[concordium_test]
    fn test_empty_response_is_incompatible() {
        let mut host = empty_host();
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked(OPERATOR_OF_ENTRYPOINT.into()),
            parse_and_ok_mock::<OperatorOfQueryParams, _>(OperatorOfQueryResponse::from(
                Vec::<bool>::new(),
            )),
        );

        let result = host
            .cis2_operator_of(
                &NFT_CONTRACT,
                Address::Account(USER_1),
                Address::Contract(MARKET),
            )
            .map_err(CustomContractError::from);
        claim_eq!(result, Err(CustomContractError::Incompatible));
    }

    #[concordium_test]
    fn test_transfer() {
        let mut host = empty_host();
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked(TRANSFER_ENTRYPOINT.into()),
            parse_and_check_mock::<TransferParameter, _>(
                |params| {
                    params.0.len() == 1
                        && params.0[0].token_id == token_id()
                        && params.0[0].amount == ContractTokenAmount::from(1)
                        && params.0[0].from == Address::Account(USER_1)
                        && matches!(params.0[0].to, Receiver::Account(to) if to == USER_2)
                },
                (),
            ),
        );

        let result = host
            .cis2_transfer(
                &NFT_CONTRACT,
                token_id(),
                Address::Account(USER_1),
                USER_2,
            )
            .map_err(CustomContractError::from);
        claim_eq!(result, Ok(()));
    }
}
