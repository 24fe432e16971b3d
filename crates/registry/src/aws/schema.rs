//! Translation of table descriptors into `CreateTable` input.

use aws_sdk_dynamodb::error::BuildError;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, GlobalSecondaryIndex, KeySchemaElement, KeyType,
    LocalSecondaryIndex, Projection as SdkProjection, ProjectionType, ProvisionedThroughput,
    ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;
use dynamo_registry_core::tables::{
    AttributeType, Capacity, GlobalIndex, KeyAttribute, LocalIndex, Projection, TableDescriptor,
    Throughput,
};
use dynamo_registry_core::ClientError;

/// Everything a `CreateTable` call needs, built without touching the network.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableRequest {
    pub table_name: String,
    pub key_schema: Vec<KeySchemaElement>,
    pub attribute_definitions: Vec<AttributeDefinition>,
    pub billing_mode: BillingMode,
    pub provisioned_throughput: Option<ProvisionedThroughput>,
    pub local_secondary_indexes: Vec<LocalSecondaryIndex>,
    pub global_secondary_indexes: Vec<GlobalSecondaryIndex>,
}

impl CreateTableRequest {
    pub fn from_descriptor(table: &TableDescriptor) -> Result<Self, BuildError> {
        let key_schema = key_schema(&table.partition_key, table.sort_key.as_ref())?;

        let attribute_definitions = table
            .key_attributes()
            .into_iter()
            .map(attribute_definition)
            .collect::<Result<Vec<_>, _>>()?;

        // Global indexes inherit the table capacity unless they declare their own.
        let (billing_mode, provisioned_throughput, index_capacity) = match table.throughput {
            Throughput::OnDemand => (BillingMode::PayPerRequest, None, None),
            Throughput::Provisioned(capacity) => (
                BillingMode::Provisioned,
                Some(provisioned_throughput(capacity)?),
                Some(capacity),
            ),
        };

        let local_secondary_indexes = table
            .local_indexes
            .iter()
            .map(|lsi| local_index(&table.partition_key, lsi))
            .collect::<Result<Vec<_>, _>>()?;

        let global_secondary_indexes = table
            .global_indexes
            .iter()
            .map(|gsi| global_index(gsi, index_capacity))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            table_name: table.name.clone(),
            key_schema,
            attribute_definitions,
            billing_mode,
            provisioned_throughput,
            local_secondary_indexes,
            global_secondary_indexes,
        })
    }

    /// Sends the request.
    pub async fn send(self, client: &Client) -> Result<(), ClientError> {
        client
            .create_table()
            .table_name(self.table_name)
            .set_key_schema(Some(self.key_schema))
            .set_attribute_definitions(Some(self.attribute_definitions))
            .billing_mode(self.billing_mode)
            .set_provisioned_throughput(self.provisioned_throughput)
            .set_local_secondary_indexes(non_empty(self.local_secondary_indexes))
            .set_global_secondary_indexes(non_empty(self.global_secondary_indexes))
            .send()
            .await
            .map_err(ClientError::new)?;
        Ok(())
    }
}

fn key_schema(
    partition_key: &KeyAttribute,
    sort_key: Option<&KeyAttribute>,
) -> Result<Vec<KeySchemaElement>, BuildError> {
    let mut schema = vec![KeySchemaElement::builder()
        .attribute_name(&partition_key.name)
        .key_type(KeyType::Hash)
        .build()?];

    if let Some(sk) = sort_key {
        schema.push(
            KeySchemaElement::builder()
                .attribute_name(&sk.name)
                .key_type(KeyType::Range)
                .build()?,
        );
    }

    Ok(schema)
}

fn attribute_definition(attr: &KeyAttribute) -> Result<AttributeDefinition, BuildError> {
    AttributeDefinition::builder()
        .attribute_name(&attr.name)
        .attribute_type(to_scalar_type(attr.attribute_type))
        .build()
}

fn provisioned_throughput(capacity: Capacity) -> Result<ProvisionedThroughput, BuildError> {
    ProvisionedThroughput::builder()
        .read_capacity_units(capacity.read)
        .write_capacity_units(capacity.write)
        .build()
}

fn projection(projection: &Projection) -> SdkProjection {
    match projection {
        Projection::All => SdkProjection::builder()
            .projection_type(ProjectionType::All)
            .build(),
        Projection::KeysOnly => SdkProjection::builder()
            .projection_type(ProjectionType::KeysOnly)
            .build(),
        Projection::Include(attributes) => SdkProjection::builder()
            .projection_type(ProjectionType::Include)
            .set_non_key_attributes(Some(attributes.clone()))
            .build(),
    }
}

fn local_index(
    partition_key: &KeyAttribute,
    lsi: &LocalIndex,
) -> Result<LocalSecondaryIndex, BuildError> {
    LocalSecondaryIndex::builder()
        .index_name(&lsi.name)
        .set_key_schema(Some(key_schema(partition_key, Some(&lsi.sort_key))?))
        .projection(projection(&lsi.projection))
        .build()
}

fn global_index(
    gsi: &GlobalIndex,
    table_capacity: Option<Capacity>,
) -> Result<GlobalSecondaryIndex, BuildError> {
    let mut builder = GlobalSecondaryIndex::builder()
        .index_name(&gsi.name)
        .set_key_schema(Some(key_schema(&gsi.partition_key, gsi.sort_key.as_ref())?))
        .projection(projection(&gsi.projection));

    if let Some(capacity) = table_capacity {
        let capacity = gsi.throughput.unwrap_or(capacity);
        builder = builder.provisioned_throughput(provisioned_throughput(capacity)?);
    }

    builder.build()
}

fn to_scalar_type(attr_type: AttributeType) -> ScalarAttributeType {
    match attr_type {
        AttributeType::String => ScalarAttributeType::S,
        AttributeType::Number => ScalarAttributeType::N,
        AttributeType::Binary => ScalarAttributeType::B,
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}
