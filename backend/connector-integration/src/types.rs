use domain_types::connector_types::ConnectorEnum;
use interfaces::connector_types::BoxedConnector;
use serde_json::{Map, Value};

use crate::connectors;

#[derive(Clone)]
pub struct ConnectorData {
    pub connector: BoxedConnector,
    pub connector_name: ConnectorEnum,
}

impl ConnectorData {
    pub fn get_connector_by_name(connector_name: &ConnectorEnum) -> Self {
        let connector = Self::convert_connector(*connector_name);
        Self {
            connector,
            connector_name: *connector_name,
        }
    }

    fn convert_connector(connector_name: ConnectorEnum) -> BoxedConnector {
        match connector_name {
            ConnectorEnum::Adyen => Box::new(connectors::Adyen::new()),
            ConnectorEnum::Stripe => Box::new(connectors::Stripe::new()),
            ConnectorEnum::Nmi => Box::new(connectors::Nmi::new()),
        }
    }
}

/// A decoded processor reply together with the request it answers.
#[derive(Debug)]
pub struct ResponseRouterData<Response, RouterData> {
    pub response: Response,
    pub router_data: RouterData,
    pub http_code: u16,
    /// Top level fields of the raw body
    pub params: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use common_enums::CurrencyUnit;
    use interfaces::api::{ConnectorCommon, ConnectorScrubbing};
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn factory_returns_matching_connector() {
        for connector_name in ConnectorEnum::iter() {
            let data = ConnectorData::get_connector_by_name(&connector_name);
            assert_eq!(data.connector.id(), connector_name.to_string());
            assert!(data.connector.supports_scrubbing());
        }
    }

    #[test]
    fn nmi_sends_major_units() {
        let data = ConnectorData::get_connector_by_name(&ConnectorEnum::Nmi);
        assert_eq!(data.connector.get_currency_unit(), CurrencyUnit::Base);
        let data = ConnectorData::get_connector_by_name(&ConnectorEnum::Stripe);
        assert_eq!(data.connector.get_currency_unit(), CurrencyUnit::Minor);
    }
}
