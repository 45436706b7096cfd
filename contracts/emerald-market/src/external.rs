use commons::Token;
use concordium_std::*;

/// Parameter of `list` and `updateListing`.
#[derive(Debug, Clone, Serialize, SchemaType, PartialEq, Eq)]
pub struct ListParams {
    /// Token to sell.
    pub token: Token,
    /// Asking price.
    pub price: Amount,
}
