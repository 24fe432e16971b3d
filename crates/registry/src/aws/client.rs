//! AWS SDK client setup.

use aws_sdk_dynamodb::config::Credentials;
use aws_sdk_dynamodb::Client;
use dynamo_registry_core::ConnectParams;

/// Provider name reported for credentials taken from the configuration.
const CREDENTIALS_PROVIDER: &str = "dynamo_registry";

/// A DynamoDB client together with the parameters it was built from.
#[derive(Debug, Clone)]
pub struct AwsConnection {
    client: Client,
    params: ConnectParams,
}

impl AwsConnection {
    pub fn new(client: Client, params: ConnectParams) -> Self {
        Self { client, params }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn params(&self) -> &ConnectParams {
        &self.params
    }
}

/// Creates a DynamoDB client.
///
/// Region is always explicit. Static credentials and the endpoint override are only
/// applied when present, otherwise the SDK's default credential chain and regional
/// endpoint are used.
pub async fn create_client(params: &ConnectParams) -> Client {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(params.region.clone()));

    if let Some(credentials) = &params.credentials {
        sdk_config_loader = sdk_config_loader.credentials_provider(Credentials::new(
            credentials.access_key_id(),
            credentials.secret_access_key(),
            None,
            None,
            CREDENTIALS_PROVIDER,
        ));
    }

    if let Some(endpoint) = params.endpoint_url() {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;
    Client::new(&sdk_config)
}
