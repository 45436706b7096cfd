use commons::{Token, BUY_TAG, LISTING_TAG, UNLISTING_TAG};
use concordium_std::*;

/// A token was listed or its price was changed.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct ListedEvent {
    /// Token for sale.
    pub token: Token,
    /// Account selling the token.
    pub seller: AccountAddress,
    /// Current asking price.
    pub price: Amount,
}

/// A listing was withdrawn by its seller.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct CancelledEvent {
    pub token: Token,
    pub seller: AccountAddress,
}

/// A listed token was sold.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct BoughtEvent {
    /// Token sold.
    pub token: Token,
    /// Previous token owner.
    pub seller: AccountAddress,
    /// New token owner.
    pub buyer: AccountAddress,
    /// Price credited to the seller.
    pub price: Amount,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug, PartialEq, Eq)]
pub enum MarketEvent {
    /// Listing or repricing a token
    Listed(ListedEvent),
    /// Cancelling a listing
    Cancelled(CancelledEvent),
    /// Buying a token
    Bought(BoughtEvent),
}

impl Serial for MarketEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            MarketEvent::Listed(event) => {
                out.write_u8(LISTING_TAG)?;
                event.serial(out)
            }
            MarketEvent::Cancelled(event) => {
                out.write_u8(UNLISTING_TAG)?;
                event.serial(out)
            }
            MarketEvent::Bought(event) => {
                out.write_u8(BUY_TAG)?;
                event.serial(out)
            }
        }
    }
}

impl Deserial for MarketEvent {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let tag = source.read_u8()?;
        match tag {
            LISTING_TAG => ListedEvent::deserial(source).map(MarketEvent::Listed),
            UNLISTING_TAG => CancelledEvent::deserial(source).map(MarketEvent::Cancelled),
            BUY_TAG => BoughtEvent::deserial(source).map(MarketEvent::Bought),
            _ => Err(ParseError::default()),
        }
    }
}
