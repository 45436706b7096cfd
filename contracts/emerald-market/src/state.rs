use commons::{ContractResult, CustomContractError, Token};
use concordium_std::*;

/// An open offer to sell a token at a fixed price.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct Listing {
    /// Account that listed the token and receives the proceeds.
    pub seller: AccountAddress,
    /// Price in CCD, never zero for a stored listing.
    pub price: Amount,
}

/// Active listings keyed by token.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct ListingStore<S: HasStateApi> {
    entries: StateMap<Token, Listing, S>,
}

impl<S: HasStateApi> ListingStore<S> {
    pub fn new(state_builder: &mut StateBuilder<S>) -> Self {
        Self {
            entries: state_builder.new_map(),
        }
    }

    pub fn get(&self, token: &Token) -> Option<Listing> {
        self.entries.get(token).map(|listing| *listing)
    }

    /// Insert or overwrite the listing of `token`.
    pub fn put(&mut self, token: Token, listing: Listing) {
        self.entries.insert(token, listing);
    }

    pub fn remove(&mut self, token: &Token) {
        self.entries.remove(token);
    }
}

/// Withdrawable balances of sellers. Missing entries are zero.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct ProceedsLedger<S: HasStateApi> {
    balances: StateMap<AccountAddress, Amount, S>,
}

impl<S: HasStateApi> ProceedsLedger<S> {
    pub fn new(state_builder: &mut StateBuilder<S>) -> Self {
        Self {
            balances: state_builder.new_map(),
        }
    }

    pub fn get(&self, owner: &AccountAddress) -> Amount {
        self.balances
            .get(owner)
            .map(|amount| *amount)
            .unwrap_or_else(Amount::zero)
    }

    /// Add `amount` to the balance of `owner` and return the new balance.
    /// Leaves the balance untouched on overflow.
    pub fn credit(&mut self, owner: AccountAddress, amount: Amount) -> ContractResult<Amount> {
        let balance = self
            .get(&owner)
            .micro_ccd
            .checked_add(amount.micro_ccd)
            .map(Amount::from_micro_ccd)
            .ok_or(CustomContractError::ProceedsOverflow)?;

        self.balances.insert(owner, balance);

        Ok(balance)
    }

    /// Read and reset the balance of `owner` in one step.
    pub fn take(&mut self, owner: &AccountAddress) -> Amount {
        let balance = self.get(owner);
        self.balances.remove(owner);
        balance
    }
}

/// The contract state.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Tokens currently for sale.
    pub listings: ListingStore<S>,
    /// Proceeds owed to sellers.
    pub proceeds: ProceedsLedger<S>,
}

impl<S: HasStateApi> State<S> {
    /// Creates a new state with no listings and no proceeds.
    pub fn empty(state_builder: &mut StateBuilder<S>) -> Self {
        Self {
            listings: ListingStore::new(state_builder),
            proceeds: ProceedsLedger::new(state_builder),
        }
    }

    /// Consume the listing of `token` and credit its price to the seller.
    ///
    /// Nothing is changed when the token is not listed or the seller's balance
    /// would overflow.
    pub fn settle_sale(&mut self, token: &Token) -> ContractResult<Listing> {
        let listing = self.listings.get(token).ok_or(CustomContractError::NotListed)?;

        self.listings.remove(token);
        if let Err(error) = self.proceeds.credit(listing.seller, listing.price) {
            self.listings.put(token.clone(), listing);
            return Err(error);
        }

        Ok(listing)
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_cis2::TokenIdVec;
    use concordium_std::test_infrastructure::*;

    const NFT_CONTRACT: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };

    const SELLER: AccountAddress = AccountAddress([1; 32]);
    const OTHER: AccountAddress = AccountAddress([2; 32]);

    fn token(id: u8) -> Token {
        Token::new(NFT_CONTRACT, TokenIdVec(vec![id]))
    }

    #[concordium_test]
    fn test_listing_store_absent_by_default() {
        let mut state_builder = TestStateBuilder::new();
        let store = ListingStore::new(&mut state_builder);

        claim_eq!(store.get(&token(0)), None);
    }

    #[concordium_test]
    fn test_listing_store_put_get_remove() {
        let mut state_builder = TestStateBuilder::new();
        let mut store = ListingStore::new(&mut state_builder);
        let listing = Listing {
            seller: SELLER,
            price: Amount::from_micro_ccd(100_000),
        };

        store.put(token(0), listing);
        claim_eq!(store.get(&token(0)), Some(listing));
        claim_eq!(store.get(&token(1)), None);

        store.remove(&token(0));
        claim_eq!(store.get(&token(0)), None);
    }

    #[concordium_test]
    fn test_proceeds_credit_accumulates() {
        let mut state_builder = TestStateBuilder::new();
        let mut ledger = ProceedsLedger::new(&mut state_builder);

        claim_eq!(ledger.get(&SELLER), Amount::zero());
        claim_eq!(
            ledger.credit(SELLER, Amount::from_micro_ccd(100)),
            Ok(Amount::from_micro_ccd(100))
        );
        claim_eq!(
            ledger.credit(SELLER, Amount::from_micro_ccd(50)),
            Ok(Amount::from_micro_ccd(150))
        );
        claim_eq!(ledger.get(&OTHER), Amount::zero());
    }

    #[concordium_test]
    fn test_proceeds_credit_overflow() {
        let mut state_builder = TestStateBuilder::new();
        let mut ledger = ProceedsLedger::new(&mut state_builder);

        claim_eq!(
            ledger.credit(SELLER, Amount::from_micro_ccd(u64::MAX)),
            Ok(Amount::from_micro_ccd(u64::MAX))
        );
        claim_eq!(
            ledger.credit(SELLER, Amount::from_micro_ccd(1)),
            Err(CustomContractError::ProceedsOverflow)
        );
        claim_eq!(ledger.get(&SELLER), Amount::from_micro_ccd(u64::MAX));
    }

    #[concordium_test]
    fn test_proceeds_take_resets() {
        let mut state_builder = TestStateBuilder::new();
        let mut ledger = ProceedsLedger::new(&mut state_builder);

        claim_eq!(ledger.take(&SELLER), Amount::zero());

        ledger
            .credit(SELLER, Amount::from_micro_ccd(100))
            .expect_report("Credit should succeed");
        claim_eq!(ledger.take(&SELLER), Amount::from_micro_ccd(100));
        claim_eq!(ledger.get(&SELLER), Amount::zero());
        claim_eq!(ledger.take(&SELLER), Amount::zero());
    }

    #[concordium_test]
    fn test_settle_sale() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::empty(&mut state_builder);
        let listing = Listing {
            seller: SELLER,
            price: Amount::from_micro_ccd(100_000),
        };

        claim_eq!(
            state.settle_sale(&token(0)),
            Err(CustomContractError::NotListed)
        );

        state.listings.put(token(0), listing);
        claim_eq!(state.settle_sale(&token(0)), Ok(listing));
        claim_eq!(state.listings.get(&token(0)), None);
        claim_eq!(state.proceeds.get(&SELLER), listing.price);
    }

    #[concordium_test]
    fn test_settle_sale_overflow_keeps_listing() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::empty(&mut state_builder);
        let listing = Listing {
            seller: SELLER,
            price: Amount::from_micro_ccd(1),
        };

        state
            .proceeds
            .credit(SELLER, Amount::from_micro_ccd(u64::MAX))
            .expect_report("Credit should succeed");
        state.listings.put(token(0), listing);

        claim_eq!(
            state.settle_sale(&token(0)),
            Err(CustomContractError::ProceedsOverflow)
        );
        claim_eq!(state.listings.get(&token(0)), Some(listing));
        claim_eq!(state.proceeds.get(&SELLER), Amount::from_micro_ccd(u64::MAX));
    }
}
