/// Tag for the Custom Unlisting event.
pub const UNLISTING_TAG: u8 = u8::MAX - 6;

/// Tag for the Custom Buy event.
pub const BUY_TAG: u8 = u8::MAX - 7;

/// Tag for the Custom Listing event.
pub const LISTING_TAG: u8 = u8::MAX - 8;

/// CIS-2 entrypoint queried for token balances.
pub const BALANCE_OF_ENTRYPOINT: &str = "balanceOf";

/// CIS-2 entrypoint queried for operator rights.
pub const OPERATOR_OF_ENTRYPOINT: &str = "operatorOf";

/// CIS-2 entrypoint moving tokens between addresses.
pub const TRANSFER_ENTRYPOINT: &str = "transfer";
