use common_utils::{
    errors::CustomResult,
    request::{Method, Request, RequestBuilder, RequestContent},
};
use domain_types::{
    connector_types::OptionKey,
    errors::ConnectorError,
    router_data::RouterData,
    router_response_types::{GatewayResponse, Response},
};
use hyperswitch_masking::Maskable;

use crate::api::ConnectorCommon;

/// One flow of one connector: how to build its request and read its reply.
pub trait ConnectorIntegration<Flow, Req>: ConnectorCommon + Sync {
    /// Option keys the flow cannot be sent without
    fn required_options(&self) -> &'static [OptionKey] {
        &[]
    }

    /// Rejects requests the connector cannot serve, such as an unsupported
    /// payment source. Runs before anything is built.
    fn validate_request(&self, _req: &RouterData<Flow, Req>) -> CustomResult<(), ConnectorError> {
        Ok(())
    }

    fn get_headers(
        &self,
        _req: &RouterData<Flow, Req>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        Ok(Vec::new())
    }

    fn get_http_method(&self) -> Method {
        Method::Post
    }

    fn get_url(&self, req: &RouterData<Flow, Req>) -> CustomResult<String, ConnectorError>;

    fn get_request_body(
        &self,
        _req: &RouterData<Flow, Req>,
    ) -> CustomResult<Option<RequestContent>, ConnectorError> {
        Ok(None)
    }

    fn build_request(&self, req: &RouterData<Flow, Req>) -> CustomResult<Request, ConnectorError> {
        Ok(RequestBuilder::new()
            .method(self.get_http_method())
            .url(&self.get_url(req)?)
            .attach_default_headers()
            .headers(self.get_headers(req)?)
            .set_optional_body(self.get_request_body(req)?)
            .build())
    }

    /// Reads a 2xx reply. Undecodable bodies become an invalid-response failure.
    fn handle_response(&self, req: &RouterData<Flow, Req>, res: Response) -> GatewayResponse;

    fn get_error_response(&self, req: &RouterData<Flow, Req>, res: Response) -> GatewayResponse {
        self.build_error_response(res, req.test_mode)
    }
}
