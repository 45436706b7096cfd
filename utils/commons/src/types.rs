use super::*;

pub type ContractResult<A> = Result<A, CustomContractError>;

/// Contract token ID type.
/// Token contracts are free to pick their own id encoding, so ids are kept as
/// raw bytes.
pub type ContractTokenId = TokenIdVec;

/// Contract token amount type.
/// CIS-2 amounts are LEB128 encoded, so `u64` parses any smaller amount type.
pub type ContractTokenAmount = TokenAmountU64;

pub type TransferParameter = TransferParams<ContractTokenId, ContractTokenAmount>;

/// Parameter type for the CIS-2 function `balanceOf` specialized to the subset
/// of TokenIDs used by this contract.
pub type ContractBalanceOfQueryParams = BalanceOfQueryParams<ContractTokenId>;

/// Response type for the CIS-2 function `balanceOf` specialized to the subset
/// of TokenAmounts used by this contract.
pub type ContractBalanceOfQueryResponse = BalanceOfQueryResponse<ContractTokenAmount>;
