use super::*;

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Token is already listed for sale (Error code: -4).
    AlreadyListed,
    /// Listing price must be above zero (Error code: -5).
    InvalidPrice,
    /// Sender does not own the token or the listing (Error code: -6).
    NotOwner,
    /// Marketplace is not an operator of the token owner (Error code: -7).
    NotApproved,
    /// Token is not listed for sale (Error code: -8).
    NotListed,
    /// Attached amount is below the listed price (Error code: -9).
    PriceNotMet,
    /// Nothing to withdraw (Error code: -10).
    NoProceeds,
    /// Token contract refused the transfer to the buyer (Error code: -11).
    AssetTransferFailed,
    /// Only account addresses can trade on the marketplace (Error code: -12).
    OnlyAccountAddress,
    /// Token contract does not speak CIS-2 (Error code: -13).
    Incompatible,
    /// Failed to invoke a contract (Error code: -14).
    InvokeContractError,
    /// Failed to invoke a transfer (Error code: -15).
    InvokeTransferError,
    /// Accumulated proceeds do not fit into an amount (Error code: -16).
    ProceedsOverflow,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping errors related to transfers to CustomContractError.
impl From<TransferError> for CustomContractError {
    fn from(_te: TransferError) -> Self {
        Self::InvokeTransferError
    }
}

#[derive(Debug)]
pub enum ContractReadError<R> {
    Call(CallContractError<R>),
    Compatibility,
    Parse,
}

/// Mapping failed read-only queries to CustomContractError.
impl<R> From<ContractReadError<R>> for CustomContractError {
    fn from(error: ContractReadError<R>) -> Self {
        match error {
            ContractReadError::Call(
                CallContractError::MissingContract
                | CallContractError::MissingEntrypoint
                | CallContractError::MessageFailed,
            ) => Self::Incompatible,
            ContractReadError::Call(_) => Self::InvokeContractError,
            ContractReadError::Compatibility | ContractReadError::Parse => Self::Incompatible,
        }
    }
}
