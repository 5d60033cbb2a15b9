use cards::{CardExpiration, CardNumber};
use common_enums::{BankAccountType, BankHolderType, CardNetwork};
use common_utils::consts::DEFAULT_CARD_HOLDER_NAME;
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};

/// Whatever funds an operation: a card, a bank account, or a reference to one
/// a processor already holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum::IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentSource {
    Card(Card),
    BankAccount(BankAccount),
    /// Processor-issued payment method token
    Token(TokenData),
    /// Billing id returned by an earlier `store`
    StoredCredential(StoredCredential),
}

impl PaymentSource {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub card_number: CardNumber,
    pub card_expiration: CardExpiration,
    pub card_holder_first_name: Option<Secret<String>>,
    pub card_holder_last_name: Option<Secret<String>>,
    pub card_cvc: Option<Secret<String>>,
    pub card_network: Option<CardNetwork>,
}

impl Card {
    /// Full holder name, or a placeholder when the caller gave none.
    pub fn get_card_holder_name(&self) -> Secret<String> {
        let parts = [
            self.card_holder_first_name.as_ref(),
            self.card_holder_last_name.as_ref(),
        ]
        .into_iter()
        .flatten()
        .map(|part| part.peek().trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>();

        if parts.is_empty() {
            Secret::new(DEFAULT_CARD_HOLDER_NAME.to_string())
        } else {
            Secret::new(parts.join(" "))
        }
    }

    pub fn get_card_network(&self) -> Option<CardNetwork> {
        self.card_network
            .or_else(|| self.card_number.get_card_network())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    pub routing_number: Secret<String>,
    pub account_number: Secret<String>,
    pub holder_name: Secret<String>,
    pub account_type: BankAccountType,
    pub holder_type: BankHolderType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenData {
    pub token: Secret<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredential {
    pub billing_id: Secret<String>,
    pub customer_reference: Option<String>,
}
