use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    InvalidAmount = 700,
    Unauthorized = 701,
    TransferFailed = 702,
    NothingToClaim = 703,
    NothingStaked = 704,
    InvalidMaxParticipants = 705,
    TooManyParticipants = 706,
    ContractMathError = 707,
    AdminNotSet = 708,
    ConfigNotSet = 709,
    SameAdmin = 710,
    NoAdminChangeInPlace = 711,
    AdminChangeExpired = 712,
}
