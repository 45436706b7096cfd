//! Marketplace entrypoints.
//!
//! Tokens stay with their owner while listed. The market holds operator rights
//! on the token contract and moves a token only when it is bought. The price of
//! a sale is kept in the contract until the seller withdraws it.
use commons::{ContractResult, CustomContractError, HostCis2Ext, Token};
use concordium_std::*;

use crate::{events::*, external::ListParams, state::*};

fn get_account_address(address: Address) -> ContractResult<AccountAddress> {
    match address {
        Address::Account(account) => Ok(account),
        Address::Contract(_) => bail!(CustomContractError::OnlyAccountAddress),
    }
}

/// Initialize the market with no listings and no proceeds.
#[init(contract = "EmeraldMarket")]
fn init<S: HasStateApi>(
    _ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    Ok(State::empty(state_builder))
}

/// Put a token up for sale.
///
/// The sender must hold the token and have made this contract an operator of
/// their tokens on the token contract.
#[receive(
    contract = "EmeraldMarket",
    name = "list",
    parameter = "ListParams",
    mutable,
    enable_logger
)]
fn list<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let seller = get_account_address(ctx.sender())?;
    let params: ListParams = ctx.parameter_cursor().get()?;

    ensure!(
        host.state().listings.get(&params.token).is_none(),
        CustomContractError::AlreadyListed
    );
    ensure!(params.price > Amount::zero(), CustomContractError::InvalidPrice);

    let contract = params.token.contract;
    let is_holder =
        host.cis2_is_holder(&contract, params.token.id.clone(), Address::Account(seller))?;
    ensure!(is_holder, CustomContractError::NotOwner);

    let is_approved = host.cis2_operator_of(
        &contract,
        Address::Account(seller),
        Address::Contract(ctx.self_address()),
    )?;
    ensure!(is_approved, CustomContractError::NotApproved);

    host.state_mut().listings.put(
        params.token.clone(),
        Listing {
            seller,
            price: params.price,
        },
    );

    logger.log(&MarketEvent::Listed(ListedEvent {
        token: params.token,
        seller,
        price: params.price,
    }))?;

    Ok(())
}

/// Withdraw a listing. Only the seller may cancel.
#[receive(
    contract = "EmeraldMarket",
    name = "cancel",
    parameter = "Token",
    mutable,
    enable_logger
)]
fn cancel<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let token: Token = ctx.parameter_cursor().get()?;

    let listing = host
        .state()
        .listings
        .get(&token)
        .ok_or(CustomContractError::NotListed)?;
    ensure!(
        ctx.sender().matches_account(&listing.seller),
        CustomContractError::NotOwner
    );

    host.state_mut().listings.remove(&token);

    logger.log(&MarketEvent::Cancelled(CancelledEvent {
        token,
        seller: listing.seller,
    }))?;

    Ok(())
}

/// Change the price of a listing. Only the seller may update.
#[receive(
    contract = "EmeraldMarket",
    name = "updateListing",
    parameter = "ListParams",
    mutable,
    enable_logger
)]
fn update_listing<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: ListParams = ctx.parameter_cursor().get()?;

    let listing = host
        .state()
        .listings
        .get(&params.token)
        .ok_or(CustomContractError::NotListed)?;
    ensure!(
        ctx.sender().matches_account(&listing.seller),
        CustomContractError::NotOwner
    );
    ensure!(params.price > Amount::zero(), CustomContractError::InvalidPrice);

    host.state_mut().listings.put(
        params.token.clone(),
        Listing {
            seller: listing.seller,
            price: params.price,
        },
    );

    logger.log(&MarketEvent::Listed(ListedEvent {
        token: params.token,
        seller: listing.seller,
        price: params.price,
    }))?;

    Ok(())
}

/// Buy a listed token for at least its price.
///
/// Only the listed price is credited to the seller. The token is transferred
/// to the buyer after the listing is consumed.
#[receive(
    contract = "EmeraldMarket",
    name = "buy",
    parameter = "Token",
    mutable,
    payable,
    enable_logger
)]
fn buy<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let buyer = get_account_address(ctx.sender())?;
    let token: Token = ctx.parameter_cursor().get()?;

    let listing = host
        .state()
        .listings
        .get(&token)
        .ok_or(CustomContractError::NotListed)?;
    ensure!(amount >= listing.price, CustomContractError::PriceNotMet);

    host.state_mut().settle_sale(&token)?;

    logger.log(&MarketEvent::Bought(BoughtEvent {
        token: token.clone(),
        seller: listing.seller,
        buyer,
        price: listing.price,
    }))?;

    // Last action: the token contract may call back into the market.
    host.cis2_transfer(
        &token.contract,
        token.id,
        Address::Account(listing.seller),
        buyer,
    )
    .map_err(|_| CustomContractError::AssetTransferFailed)?;

    Ok(())
}

/// Pay out the proceeds owed to the sender.
#[receive(contract = "EmeraldMarket", name = "withdraw", mutable)]
fn withdraw<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    let owner = get_account_address(ctx.sender())?;

    let proceeds = host.state_mut().proceeds.take(&owner);
    ensure!(proceeds > Amount::zero(), CustomContractError::NoProceeds);

    host.invoke_transfer(&owner, proceeds)?;

    Ok(())
}

/// View the listing of a token, if any.
#[receive(
    contract = "EmeraldMarket",
    name = "getListing",
    parameter = "Token",
    return_value = "Option<Listing>"
)]
fn get_listing<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Option<Listing>> {
    let token: Token = ctx.parameter_cursor().get()?;
    Ok(host.state().listings.get(&token))
}

/// View the proceeds an account can withdraw.
#[receive(
    contract = "EmeraldMarket",
    name = "getProceeds",
    parameter = "AccountAddress",
    return_value = "Amount"
)]
fn get_proceeds<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Amount> {
    let owner: AccountAddress = ctx.parameter_cursor().get()?;
    Ok(host.state().proceeds.get(&owner))
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::registry::MockRegistry;
    use commons::{BALANCE_OF_ENTRYPOINT, OPERATOR_OF_ENTRYPOINT, TRANSFER_ENTRYPOINT};
    use concordium_cis2::TokenIdVec;
    use concordium_std::test_infrastructure::*;

    type Host = TestHost<State<TestStateApi>>;

    const NFT_CONTRACT: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const MARKET: ContractAddress = ContractAddress {
        index: 2,
        subindex: 0,
    };
    const SELLER: AccountAddress = AccountAddress([0; 32]);
    const BUYER: AccountAddress = AccountAddress([1; 32]);
    const STRANGER: AccountAddress = AccountAddress([2; 32]);
    const PRICE: Amount = Amount::from_micro_ccd(100_000);

    fn nft(id: u8) -> Token {
        Token::new(NFT_CONTRACT, TokenIdVec(vec![id]))
    }

    fn receive_ctx(sender: Address, parameter: &[u8]) -> TestReceiveContext<'_> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(sender);
        ctx.set_self_address(MARKET);
        ctx.set_parameter(parameter);
        ctx
    }

    fn install_registry(host: &mut Host, registry: &MockRegistry) {
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked(BALANCE_OF_ENTRYPOINT.into()),
            registry.balance_of_mock(),
        );
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked(OPERATOR_OF_ENTRYPOINT.into()),
            registry.operator_of_mock(),
        );
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked(TRANSFER_ENTRYPOINT.into()),
            registry.transfer_mock(Address::Contract(MARKET), |_: &State<TestStateApi>| true),
        );
    }

    /// Empty market next to a token contract where `SELLER` holds tokens 0
    /// and 1 and made the market an operator.
    fn default_host() -> (Host, MockRegistry) {
        let ctx = TestInitContext::empty();
        let mut state_builder = TestStateBuilder::new();
        let state = init(&ctx, &mut state_builder).expect_report("Failed during init_EmeraldMarket");
        let mut host = TestHost::new(state, state_builder);

        let registry = MockRegistry::default();
        registry.mint(nft(0).id, Address::Account(SELLER));
        registry.mint(nft(1).id, Address::Account(SELLER));
        registry.update_operator(Address::Account(SELLER), Address::Contract(MARKET), true);
        install_registry(&mut host, &registry);

        (host, registry)
    }

    fn call_list(
        host: &mut Host,
        logger: &mut TestLogger,
        sender: Address,
        token: Token,
        price: Amount,
    ) -> ContractResult<()> {
        let parameter = to_bytes(&ListParams { token, price });
        let ctx = receive_ctx(sender, &parameter);
        list(&ctx, host, logger)
    }

    fn call_cancel(
        host: &mut Host,
        logger: &mut TestLogger,
        sender: Address,
        token: Token,
    ) -> ContractResult<()> {
        let parameter = to_bytes(&token);
        let ctx = receive_ctx(sender, &parameter);
        cancel(&ctx, host, logger)
    }

    fn call_update(
        host: &mut Host,
        logger: &mut TestLogger,
        sender: Address,
        token: Token,
        price: Amount,
    ) -> ContractResult<()> {
        let parameter = to_bytes(&ListParams { token, price });
        let ctx = receive_ctx(sender, &parameter);
        update_listing(&ctx, host, logger)
    }

    fn call_buy(
        host: &mut Host,
        logger: &mut TestLogger,
        sender: Address,
        token: Token,
        amount: Amount,
    ) -> ContractResult<()> {
        let parameter = to_bytes(&token);
        let ctx = receive_ctx(sender, &parameter);
        buy(&ctx, host, amount, logger)
    }

    fn call_withdraw(host: &mut Host, sender: Address) -> ContractResult<()> {
        let ctx = receive_ctx(sender, &[]);
        withdraw(&ctx, host)
    }

    fn listing_of(host: &Host, token: &Token) -> Option<Listing> {
        let parameter = to_bytes(token);
        let ctx = receive_ctx(Address::Account(STRANGER), &parameter);
        get_listing(&ctx, host).expect_report("getListing failed")
    }

    fn proceeds_of(host: &Host, owner: AccountAddress) -> Amount {
        let parameter = to_bytes(&owner);
        let ctx = receive_ctx(Address::Account(STRANGER), &parameter);
        get_proceeds(&ctx, host).expect_report("getProceeds failed")
    }

    /// Lists token 0 for `PRICE` and clears the logger.
    fn listed_host() -> (Host, MockRegistry) {
        let (mut host, registry) = default_host();
        let mut logger = TestLogger::init();
        call_list(&mut host, &mut logger, Address::Account(SELLER), nft(0), PRICE)
            .expect_report("list failed");
        (host, registry)
    }

    #[concordium_test]
    fn test_init() {
        let (host, _) = default_host();

        claim_eq!(listing_of(&host, &nft(0)), None);
        claim_eq!(proceeds_of(&host, SELLER), Amount::zero());
    }

    #[concordium_test]
    fn test_list() {
        let (mut host, _) = default_host();
        let mut logger = TestLogger::init();

        let result = call_list(&mut host, &mut logger, Address::Account(SELLER), nft(0), PRICE);

        claim_eq!(result, Ok(()));
        claim_eq!(
            listing_of(&host, &nft(0)),
            Some(Listing {
                seller: SELLER,
                price: PRICE,
            })
        );
        claim_eq!(logger.logs.len(), 1, "Exactly one event should be logged");

        let event: MarketEvent =
            from_bytes(&logger.logs[0]).expect_report("Logged event should parse");
        claim_eq!(
            event,
            MarketEvent::Listed(ListedEvent {
                token: nft(0),
                seller: SELLER,
                price: PRICE,
            })
        );
    }

    #[concordium_test]
    fn test_list_already_listed() {
        let (mut host, _) = listed_host();
        let mut logger = TestLogger::init();

        let result = call_list(
            &mut host,
            &mut logger,
            Address::Account(SELLER),
            nft(0),
            Amount::from_micro_ccd(200_000),
        );

        claim_eq!(result, Err(CustomContractError::AlreadyListed));
        claim_eq!(listing_of(&host, &nft(0)).map(|listing| listing.price), Some(PRICE));
        claim!(logger.logs.is_empty(), "Nothing should be logged");
    }

    #[concordium_test]
    fn test_list_zero_price() {
        let (mut host, _) = default_host();
        let mut logger = TestLogger::init();

        let result = call_list(
            &mut host,
            &mut logger,
            Address::Account(SELLER),
            nft(0),
            Amount::zero(),
        );

        claim_eq!(result, Err(CustomContractError::InvalidPrice));
        claim_eq!(listing_of(&host, &nft(0)), None);
    }

    #[concordium_test]
    fn test_list_not_holder() {
        let (mut host, _) = default_host();
        let mut logger = TestLogger::init();

        let result = call_list(&mut host, &mut logger, Address::Account(STRANGER), nft(0), PRICE);

        claim_eq!(result, Err(CustomContractError::NotOwner));
        claim_eq!(listing_of(&host, &nft(0)), None);
    }

    #[concordium_test]
    fn test_list_not_approved() {
        let (mut host, registry) = default_host();
        let mut logger = TestLogger::init();
        registry.update_operator(Address::Account(SELLER), Address::Contract(MARKET), false);

        let result = call_list(&mut host, &mut logger, Address::Account(SELLER), nft(0), PRICE);

        claim_eq!(result, Err(CustomContractError::NotApproved));
        claim_eq!(listing_of(&host, &nft(0)), None);
        claim!(logger.logs.is_empty(), "Nothing should be logged");
    }

    #[concordium_test]
    fn test_list_from_contract() {
        let (mut host, _) = default_host();
        let mut logger = TestLogger::init();

        let result = call_list(&mut host, &mut logger, Address::Contract(MARKET), nft(0), PRICE);

        claim_eq!(result, Err(CustomContractError::OnlyAccountAddress));
    }

    #[concordium_test]
    fn test_list_incompatible_token_contract() {
        let (mut host, _) = default_host();
        let mut logger = TestLogger::init();
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked(BALANCE_OF_ENTRYPOINT.into()),
            MockFn::new(|_, _, _, _| Ok((false, Some(())))),
        );

        let result = call_list(&mut host, &mut logger, Address::Account(SELLER), nft(0), PRICE);

        claim_eq!(result, Err(CustomContractError::Incompatible));
        claim_eq!(listing_of(&host, &nft(0)), None);
    }

    #[concordium_test]
    fn test_cancel() {
        let (mut host, registry) = listed_host();
        let mut logger = TestLogger::init();

        let result = call_cancel(&mut host, &mut logger, Address::Account(SELLER), nft(0));

        claim_eq!(result, Ok(()));
        claim_eq!(listing_of(&host, &nft(0)), None);
        claim_eq!(
            registry.holder_of(&nft(0).id),
            Some(Address::Account(SELLER)),
            "Cancelling should not move the token"
        );
        claim_eq!(
            logger.logs,
            vec![to_bytes(&MarketEvent::Cancelled(CancelledEvent {
                token: nft(0),
                seller: SELLER,
            }))]
        );
    }

    #[concordium_test]
    fn test_cancel_not_listed() {
        let (mut host, _) = default_host();
        let mut logger = TestLogger::init();

        let result = call_cancel(&mut host, &mut logger, Address::Account(SELLER), nft(0));

        claim_eq!(result, Err(CustomContractError::NotListed));
    }

    #[concordium_test]
    fn test_cancel_not_seller() {
        let (mut host, _) = listed_host();
        let mut logger = TestLogger::init();

        let result = call_cancel(&mut host, &mut logger, Address::Account(STRANGER), nft(0));

        claim_eq!(result, Err(CustomContractError::NotOwner));
        claim!(listing_of(&host, &nft(0)).is_some(), "Listing should remain");
    }

    #[concordium_test]
    fn test_update_listing() {
        let (mut host, _) = listed_host();
        let mut logger = TestLogger::init();
        let new_price = Amount::from_micro_ccd(200_000);

        let result = call_update(&mut host, &mut logger, Address::Account(SELLER), nft(0), new_price);

        claim_eq!(result, Ok(()));
        claim_eq!(
            listing_of(&host, &nft(0)),
            Some(Listing {
                seller: SELLER,
                price: new_price,
            })
        );
        claim_eq!(
            logger.logs,
            vec![to_bytes(&MarketEvent::Listed(ListedEvent {
                token: nft(0),
                seller: SELLER,
                price: new_price,
            }))]
        );
    }

    #[concordium_test]
    fn test_update_listing_not_listed() {
        let (mut host, _) = default_host();
        let mut logger = TestLogger::init();

        let result = call_update(&mut host, &mut logger, Address::Account(SELLER), nft(0), PRICE);

        claim_eq!(result, Err(CustomContractError::NotListed));
        claim_eq!(listing_of(&host, &nft(0)), None, "Update must not create a listing");
    }

    #[concordium_test]
    fn test_update_listing_not_seller() {
        let (mut host, _) = listed_host();
        let mut logger = TestLogger::init();

        let result = call_update(
            &mut host,
            &mut logger,
            Address::Account(STRANGER),
            nft(0),
            Amount::from_micro_ccd(1),
        );

        claim_eq!(result, Err(CustomContractError::NotOwner));
        claim_eq!(listing_of(&host, &nft(0)).map(|listing| listing.price), Some(PRICE));
    }

    #[concordium_test]
    fn test_update_listing_zero_price() {
        let (mut host, _) = listed_host();
        let mut logger = TestLogger::init();

        let result = call_update(
            &mut host,
            &mut logger,
            Address::Account(SELLER),
            nft(0),
            Amount::zero(),
        );

        claim_eq!(result, Err(CustomContractError::InvalidPrice));
        claim_eq!(listing_of(&host, &nft(0)).map(|listing| listing.price), Some(PRICE));
    }

    #[concordium_test]
    fn test_buy() {
        let (mut host, registry) = listed_host();
        let mut logger = TestLogger::init();

        let result = call_buy(&mut host, &mut logger, Address::Account(BUYER), nft(0), PRICE);

        claim_eq!(result, Ok(()));
        claim_eq!(listing_of(&host, &nft(0)), None);
        claim_eq!(proceeds_of(&host, SELLER), PRICE);
        claim_eq!(
            registry.holder_of(&nft(0).id),
            Some(Address::Account(BUYER)),
            "Token should be owned by the buyer"
        );
        claim_eq!(
            logger.logs,
            vec![to_bytes(&MarketEvent::Bought(BoughtEvent {
                token: nft(0),
                seller: SELLER,
                buyer: BUYER,
                price: PRICE,
            }))]
        );
    }

    #[concordium_test]
    fn test_buy_overpaid_credits_price_only() {
        let (mut host, _) = listed_host();
        let mut logger = TestLogger::init();

        let result = call_buy(
            &mut host,
            &mut logger,
            Address::Account(BUYER),
            nft(0),
            Amount::from_micro_ccd(250_000),
        );

        claim_eq!(result, Ok(()));
        claim_eq!(proceeds_of(&host, SELLER), PRICE);
    }

    #[concordium_test]
    fn test_buy_settles_before_transfer() {
        let (mut host, registry) = listed_host();
        let mut logger = TestLogger::init();
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked(TRANSFER_ENTRYPOINT.into()),
            registry.transfer_mock(Address::Contract(MARKET), |state: &State<TestStateApi>| {
                state.listings.get(&nft(0)).is_none() && state.proceeds.get(&SELLER) == PRICE
            }),
        );

        let result = call_buy(&mut host, &mut logger, Address::Account(BUYER), nft(0), PRICE);

        claim_eq!(result, Ok(()), "State should be settled when the token contract is called");
    }

    #[concordium_test]
    fn test_buy_price_not_met() {
        let (mut host, registry) = listed_host();
        let mut logger = TestLogger::init();

        let result = call_buy(
            &mut host,
            &mut logger,
            Address::Account(BUYER),
            nft(0),
            Amount::from_micro_ccd(99_999),
        );

        claim_eq!(result, Err(CustomContractError::PriceNotMet));
        claim!(listing_of(&host, &nft(0)).is_some(), "Listing should remain");
        claim_eq!(proceeds_of(&host, SELLER), Amount::zero());
        claim_eq!(registry.holder_of(&nft(0).id), Some(Address::Account(SELLER)));
    }

    #[concordium_test]
    fn test_buy_not_listed() {
        let (mut host, _) = default_host();
        let mut logger = TestLogger::init();

        let result = call_buy(&mut host, &mut logger, Address::Account(BUYER), nft(0), PRICE);

        claim_eq!(result, Err(CustomContractError::NotListed));
    }

    #[concordium_test]
    fn test_buy_from_contract() {
        let (mut host, _) = listed_host();
        let mut logger = TestLogger::init();

        let result = call_buy(&mut host, &mut logger, Address::Contract(MARKET), nft(0), PRICE);

        claim_eq!(result, Err(CustomContractError::OnlyAccountAddress));
    }

    #[concordium_test]
    fn test_buy_transfer_rejected() {
        let (mut host, registry) = listed_host();
        let mut logger = TestLogger::init();
        registry.update_operator(Address::Account(SELLER), Address::Contract(MARKET), false);

        let result = call_buy(&mut host, &mut logger, Address::Account(BUYER), nft(0), PRICE);

        claim_eq!(result, Err(CustomContractError::AssetTransferFailed));
        claim_eq!(registry.holder_of(&nft(0).id), Some(Address::Account(SELLER)));
    }

    #[concordium_test]
    fn test_withdraw() {
        let (mut host, _) = listed_host();
        let mut logger = TestLogger::init();
        call_buy(&mut host, &mut logger, Address::Account(BUYER), nft(0), PRICE)
            .expect_report("buy failed");
        host.set_self_balance(PRICE);

        let result = call_withdraw(&mut host, Address::Account(SELLER));

        claim_eq!(result, Ok(()));
        claim!(host.transfer_occurred(&SELLER, PRICE), "Seller should be paid");
        claim_eq!(proceeds_of(&host, SELLER), Amount::zero());

        let second = call_withdraw(&mut host, Address::Account(SELLER));
        claim_eq!(second, Err(CustomContractError::NoProceeds));
    }

    #[concordium_test]
    fn test_withdraw_no_proceeds() {
        let (mut host, _) = default_host();

        let result = call_withdraw(&mut host, Address::Account(SELLER));

        claim_eq!(result, Err(CustomContractError::NoProceeds));
    }

    #[concordium_test]
    fn test_withdraw_from_contract() {
        let (mut host, _) = default_host();

        let result = call_withdraw(&mut host, Address::Contract(MARKET));

        claim_eq!(result, Err(CustomContractError::OnlyAccountAddress));
    }

    #[concordium_test]
    fn test_relist_after_cancel() {
        let (mut host, _) = listed_host();
        let mut logger = TestLogger::init();
        call_cancel(&mut host, &mut logger, Address::Account(SELLER), nft(0))
            .expect_report("cancel failed");

        let result = call_list(
            &mut host,
            &mut logger,
            Address::Account(SELLER),
            nft(0),
            Amount::from_micro_ccd(300_000),
        );

        claim_eq!(result, Ok(()));
        claim_eq!(
            listing_of(&host, &nft(0)).map(|listing| listing.price),
            Some(Amount::from_micro_ccd(300_000))
        );
    }

    #[concordium_test]
    fn test_proceeds_accumulate() {
        let (mut host, _) = default_host();
        let mut logger = TestLogger::init();
        let second_price = Amount::from_micro_ccd(400_000);
        call_list(&mut host, &mut logger, Address::Account(SELLER), nft(0), PRICE)
            .expect_report("list failed");
        call_list(&mut host, &mut logger, Address::Account(SELLER), nft(1), second_price)
            .expect_report("list failed");

        call_buy(&mut host, &mut logger, Address::Account(BUYER), nft(0), PRICE)
            .expect_report("buy failed");
        call_buy(&mut host, &mut logger, Address::Account(BUYER), nft(1), second_price)
            .expect_report("buy failed");

        let total = Amount::from_micro_ccd(500_000);
        claim_eq!(proceeds_of(&host, SELLER), total);

        host.set_self_balance(total);
        claim_eq!(call_withdraw(&mut host, Address::Account(SELLER)), Ok(()));
        claim!(host.transfer_occurred(&SELLER, total), "Seller should be paid both sales");
    }

    #[concordium_test]
    fn test_resold_by_buyer() {
        let (mut host, registry) = listed_host();
        let mut logger = TestLogger::init();
        call_buy(&mut host, &mut logger, Address::Account(BUYER), nft(0), PRICE)
            .expect_report("buy failed");
        registry.update_operator(Address::Account(BUYER), Address::Contract(MARKET), true);

        let result = call_list(&mut host, &mut logger, Address::Account(BUYER), nft(0), PRICE);

        claim_eq!(result, Ok(()));
        claim_eq!(
            listing_of(&host, &nft(0)).map(|listing| listing.seller),
            Some(BUYER)
        );
    }
}
