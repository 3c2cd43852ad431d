use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    AlreadyInitialized = 100,
    NotInitialized = 101,
    ZeroAmount = 102,
    AssetNotAllowed = 103,
    AlreadyAllowed = 104,
    FeeMustDecrease = 105,
    InvalidFeeRate = 106,
    ReceiverNotCallable = 107,
    InsufficientLiquidity = 108,
    LoanNotRepaid = 109,
    FlashLoanActive = 110,
    NoActiveFlashLoan = 111,
    PayloadTooLarge = 112,
    InvalidPrice = 113,
    Overflow = 114,
    ReceiptsOutstanding = 115,
    InvalidMetadata = 116,
    DepositTooSmall = 117,
}
