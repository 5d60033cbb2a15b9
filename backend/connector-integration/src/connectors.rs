pub mod adyen;
pub use self::adyen::Adyen;

pub mod nmi;
pub use self::nmi::Nmi;

pub mod stripe;
pub use self::stripe::Stripe;
