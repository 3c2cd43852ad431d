use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ReceiptTokenError {
    AlreadyInitialized = 200,
    NotInitialized = 201,
    InvalidAddress = 202,
    InsufficientBalance = 203,
    InsufficientAllowance = 204,
    Overflow = 205,
    NoSupply = 206,
    RateMustIncrease = 207,
    NegativeAmount = 208,
    InvalidExpiration = 209,
}
