//! Bitkub API error code mapping
//!
//! Every Bitkub response carries a numeric `error` field where `0` means
//! success. This module maps the documented codes to variants and
//! human-readable messages. Codes outside the table are kept as raw numbers
//! by callers and described as "Unknown error".

/// Message used for codes that are not in the table
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// All documented Bitkub API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum BitkubErrorCode {
    // === Request / authentication ===
    /// 1: Invalid JSON payload
    InvalidJsonPayload,
    /// 2: Missing X-BTK-APIKEY
    MissingApiKey,
    /// 3: Invalid API key
    InvalidApiKey,
    /// 4: API pending for activation
    ApiPendingActivation,
    /// 5: IP not allowed
    IpNotAllowed,
    /// 6: Missing / invalid signature
    InvalidSignature,
    /// 7: Missing timestamp
    MissingTimestamp,
    /// 8: Invalid timestamp
    InvalidTimestamp,
    /// 9: Invalid user
    InvalidUser,
    /// 10: Invalid parameter
    InvalidParameter,
    /// 11: Invalid symbol
    InvalidSymbol,
    /// 12: Invalid amount
    InvalidAmount,
    /// 13: Invalid rate
    InvalidRate,
    /// 14: Improper rate
    ImproperRate,
    /// 15: Amount too low
    AmountTooLow,

    // === Balances / orders ===
    /// 16: Failed to get balance
    BalanceUnavailable,
    /// 17: Wallet is empty
    WalletEmpty,
    /// 18: Insufficient balance
    InsufficientBalance,
    /// 19: Failed to insert order into db
    OrderInsertFailed,
    /// 20: Failed to deduct balance
    BalanceDeductFailed,
    /// 21: Invalid order for cancellation
    InvalidCancellation,
    /// 22: Invalid side
    InvalidSide,
    /// 23: Failed to update order status
    OrderUpdateFailed,
    /// 24: Invalid order for lookup
    OrderNotFound,
    /// 25: KYC level 1 is required to proceed
    KycRequired,
    /// 30: Limit exceeds
    LimitExceeded,

    // === Funding ===
    /// 40: Pending withdrawal exists
    PendingWithdrawal,
    /// 41: Invalid currency for withdrawal
    InvalidWithdrawalCurrency,
    /// 42: Address is not in whitelist
    AddressNotWhitelisted,
    /// 43: Failed to deduct crypto
    CryptoDeductFailed,
    /// 44: Failed to create withdrawal record
    WithdrawalRecordFailed,
    /// 45: Nonce has to be numeric
    NonNumericNonce,
    /// 46: Invalid nonce
    InvalidNonce,
    /// 47: Withdrawal limit exceeds
    WithdrawalLimitExceeded,
    /// 48: Invalid bank account
    InvalidBankAccount,
    /// 49: Bank limit exceeds
    BankLimitExceeded,
    /// 50: Pending withdrawal exists
    PendingFiatWithdrawal,
    /// 51: Withdrawal is under maintenance
    WithdrawalMaintenance,
    /// 52: Invalid permission
    InvalidPermission,
    /// 53: Invalid internal address
    InvalidInternalAddress,
    /// 54: Address has been deprecated
    AddressDeprecated,
    /// 55: Cancel only mode
    CancelOnlyMode,
    /// 56: User has been suspended from purchasing
    PurchaseSuspended,
    /// 57: User has been suspended from selling
    SellSuspended,
    /// 58: User bank is not verified
    BankNotVerified,

    // === Server ===
    /// 90: Server error (please contact support)
    ServerError,
}

impl BitkubErrorCode {
    /// Look up a numeric code
    ///
    /// Returns `None` for `0` (success) and for codes outside the table.
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            1 => Self::InvalidJsonPayload,
            2 => Self::MissingApiKey,
            3 => Self::InvalidApiKey,
            4 => Self::ApiPendingActivation,
            5 => Self::IpNotAllowed,
            6 => Self::InvalidSignature,
            7 => Self::MissingTimestamp,
            8 => Self::InvalidTimestamp,
            9 => Self::InvalidUser,
            10 => Self::InvalidParameter,
            11 => Self::InvalidSymbol,
            12 => Self::InvalidAmount,
            13 => Self::InvalidRate,
            14 => Self::ImproperRate,
            15 => Self::AmountTooLow,
            16 => Self::BalanceUnavailable,
            17 => Self::WalletEmpty,
            18 => Self::InsufficientBalance,
            19 => Self::OrderInsertFailed,
            20 => Self::BalanceDeductFailed,
            21 => Self::InvalidCancellation,
            22 => Self::InvalidSide,
            23 => Self::OrderUpdateFailed,
            24 => Self::OrderNotFound,
            25 => Self::KycRequired,
            30 => Self::LimitExceeded,
            40 => Self::PendingWithdrawal,
            41 => Self::InvalidWithdrawalCurrency,
            42 => Self::AddressNotWhitelisted,
            43 => Self::CryptoDeductFailed,
            44 => Self::WithdrawalRecordFailed,
            45 => Self::NonNumericNonce,
            46 => Self::InvalidNonce,
            47 => Self::WithdrawalLimitExceeded,
            48 => Self::InvalidBankAccount,
            49 => Self::BankLimitExceeded,
            50 => Self::PendingFiatWithdrawal,
            51 => Self::WithdrawalMaintenance,
            52 => Self::InvalidPermission,
            53 => Self::InvalidInternalAddress,
            54 => Self::AddressDeprecated,
            55 => Self::CancelOnlyMode,
            56 => Self::PurchaseSuspended,
            57 => Self::SellSuspended,
            58 => Self::BankNotVerified,
            90 => Self::ServerError,
            _ => return None,
        })
    }

    /// The numeric code as sent by the exchange
    pub fn code(&self) -> i64 {
        match self {
            Self::InvalidJsonPayload => 1,
            Self::MissingApiKey => 2,
            Self::InvalidApiKey => 3,
            Self::ApiPendingActivation => 4,
            Self::IpNotAllowed => 5,
            Self::InvalidSignature => 6,
            Self::MissingTimestamp => 7,
            Self::InvalidTimestamp => 8,
            Self::InvalidUser => 9,
            Self::InvalidParameter => 10,
            Self::InvalidSymbol => 11,
            Self::InvalidAmount => 12,
            Self::InvalidRate => 13,
            Self::ImproperRate => 14,
            Self::AmountTooLow => 15,
            Self::BalanceUnavailable => 16,
            Self::WalletEmpty => 17,
            Self::InsufficientBalance => 18,
            Self::OrderInsertFailed => 19,
            Self::BalanceDeductFailed => 20,
            Self::InvalidCancellation => 21,
            Self::InvalidSide => 22,
            Self::OrderUpdateFailed => 23,
            Self::OrderNotFound => 24,
            Self::KycRequired => 25,
            Self::LimitExceeded => 30,
            Self::PendingWithdrawal => 40,
            Self::InvalidWithdrawalCurrency => 41,
            Self::AddressNotWhitelisted => 42,
            Self::CryptoDeductFailed => 43,
            Self::WithdrawalRecordFailed => 44,
            Self::NonNumericNonce => 45,
            Self::InvalidNonce => 46,
            Self::WithdrawalLimitExceeded => 47,
            Self::InvalidBankAccount => 48,
            Self::BankLimitExceeded => 49,
            Self::PendingFiatWithdrawal => 50,
            Self::WithdrawalMaintenance => 51,
            Self::InvalidPermission => 52,
            Self::InvalidInternalAddress => 53,
            Self::AddressDeprecated => 54,
            Self::CancelOnlyMode => 55,
            Self::PurchaseSuspended => 56,
            Self::SellSuspended => 57,
            Self::BankNotVerified => 58,
            Self::ServerError => 90,
        }
    }

    /// Get a human-readable description of this error
    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidJsonPayload => "Invalid JSON payload",
            Self::MissingApiKey => "Missing X-BTK-APIKEY",
            Self::InvalidApiKey => "Invalid API key",
            Self::ApiPendingActivation => "API pending for activation",
            Self::IpNotAllowed => "IP not allowed",
            Self::InvalidSignature => "Missing / invalid signature",
            Self::MissingTimestamp => "Missing timestamp",
            Self::InvalidTimestamp => "Invalid timestamp",
            Self::InvalidUser => "Invalid user",
            Self::InvalidParameter => "Invalid parameter",
            Self::InvalidSymbol => "Invalid symbol",
            Self::InvalidAmount => "Invalid amount",
            Self::InvalidRate => "Invalid rate",
            Self::ImproperRate => "Improper rate",
            Self::AmountTooLow => "Amount too low",
            Self::BalanceUnavailable => "Failed to get balance",
            Self::WalletEmpty => "Wallet is empty",
            Self::InsufficientBalance => "Insufficient balance",
            Self::OrderInsertFailed => "Failed to insert order into db",
            Self::BalanceDeductFailed => "Failed to deduct balance",
            Self::InvalidCancellation => "Invalid order for cancellation",
            Self::InvalidSide => "Invalid side",
            Self::OrderUpdateFailed => "Failed to update order status",
            Self::OrderNotFound => "Invalid order for lookup",
            Self::KycRequired => "KYC level 1 is required to proceed",
            Self::LimitExceeded => "Limit exceeds",
            Self::PendingWithdrawal => "Pending withdrawal exists",
            Self::InvalidWithdrawalCurrency => "Invalid currency for withdrawal",
            Self::AddressNotWhitelisted => "Address is not in whitelist",
            Self::CryptoDeductFailed => "Failed to deduct crypto",
            Self::WithdrawalRecordFailed => "Failed to create withdrawal record",
            Self::NonNumericNonce => "Nonce has to be numeric",
            Self::InvalidNonce => "Invalid nonce",
            Self::WithdrawalLimitExceeded => "Withdrawal limit exceeds",
            Self::InvalidBankAccount => "Invalid bank account",
            Self::BankLimitExceeded => "Bank limit exceeds",
            Self::PendingFiatWithdrawal => "Pending withdrawal exists",
            Self::WithdrawalMaintenance => "Withdrawal is under maintenance",
            Self::InvalidPermission => "Invalid permission",
            Self::InvalidInternalAddress => "Invalid internal address",
            Self::AddressDeprecated => "Address has been deprecated",
            Self::CancelOnlyMode => "Cancel only mode",
            Self::PurchaseSuspended => "User has been suspended from purchasing",
            Self::SellSuspended => "User has been suspended from selling",
            Self::BankNotVerified => "User bank is not verified",
            Self::ServerError => "Server error (please contact support)",
        }
    }

    /// Check if this is an authentication-related error
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey
                | Self::InvalidApiKey
                | Self::ApiPendingActivation
                | Self::IpNotAllowed
                | Self::InvalidSignature
                | Self::InvalidPermission
        )
    }

    /// Check if the server rejected the request timestamp
    ///
    /// Usually means the local clock drifted from the exchange clock, or a
    /// signed request was replayed.
    pub fn is_timestamp_error(&self) -> bool {
        matches!(self, Self::MissingTimestamp | Self::InvalidTimestamp)
    }

    /// Check if this is a balance-related error
    pub fn is_balance_error(&self) -> bool {
        matches!(
            self,
            Self::BalanceUnavailable
                | Self::WalletEmpty
                | Self::InsufficientBalance
                | Self::BalanceDeductFailed
        )
    }
}

/// Describe any numeric code, falling back to [`UNKNOWN_ERROR_MESSAGE`]
pub fn describe_error_code(code: i64) -> &'static str {
    BitkubErrorCode::from_code(code)
        .map(|c| c.description())
        .unwrap_or(UNKNOWN_ERROR_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_round_trip() {
        for code in (1..=25).chain([30, 40, 47, 58, 90]) {
            let parsed = BitkubErrorCode::from_code(code).expect("documented code");
            assert_eq!(parsed.code(), code);
        }
    }

    #[test]
    fn test_success_and_unknown_codes() {
        assert_eq!(BitkubErrorCode::from_code(0), None);
        assert_eq!(BitkubErrorCode::from_code(26), None);
        assert_eq!(BitkubErrorCode::from_code(-1), None);
        assert_eq!(describe_error_code(999), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(describe_error_code(5), "IP not allowed");
        assert_eq!(describe_error_code(18), "Insufficient balance");
        assert_eq!(
            BitkubErrorCode::ServerError.description(),
            "Server error (please contact support)"
        );
    }

    #[test]
    fn test_classifiers() {
        assert!(BitkubErrorCode::InvalidSignature.is_auth_error());
        assert!(BitkubErrorCode::InvalidTimestamp.is_timestamp_error());
        assert!(!BitkubErrorCode::InvalidTimestamp.is_auth_error());
        assert!(BitkubErrorCode::InsufficientBalance.is_balance_error());
    }
}
