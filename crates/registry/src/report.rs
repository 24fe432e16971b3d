//! Pure functions rendering the configuration for display.

use dynamo_registry_core::tables::{AttributeType, KeyAttribute, Projection, TableDescriptor, Throughput};
use dynamo_registry_core::{ConnectParams, DynamoConfig};

/// Formats the effective configuration. Secrets are never printed.
pub fn format_config(config: &DynamoConfig) -> Vec<String> {
    let params = ConnectParams::from_config(config);

    let credentials = match &params.credentials {
        Some(credentials) => format!("static ({})", credentials.access_key_id()),
        None => "default provider chain".to_string(),
    };

    let mut lines = vec![
        format!("Target: {}", params.target_display()),
        format!("Region: {}", params.region),
        format!("Credentials: {credentials}"),
        format!("Secure transport: {}", params.secure),
        format!("Tables ({}):", config.tables().len()),
    ];

    for table in config.tables() {
        lines.extend(format_table(table).into_iter().map(|line| format!("  {line}")));
    }

    lines
}

/// Formats a single table descriptor.
pub fn format_table(table: &TableDescriptor) -> Vec<String> {
    let mut lines = vec![
        format!("= {}", table.name),
        format!("  Partition key: {}", format_key(&table.partition_key)),
    ];
    if let Some(sk) = &table.sort_key {
        lines.push(format!("  Sort key: {}", format_key(sk)));
    }

    lines.push(match table.throughput {
        Throughput::Provisioned(c) => format!("  Throughput: {} read / {} write", c.read, c.write),
        Throughput::OnDemand => "  Billing: PAY_PER_REQUEST".to_string(),
    });

    for lsi in &table.local_indexes {
        lines.push(format!(
            "  + LSI: {} (sort key: {}, projection: {})",
            lsi.name,
            format_key(&lsi.sort_key),
            format_projection(&lsi.projection)
        ));
    }

    for gsi in &table.global_indexes {
        let mut line = format!(
            "  + GSI: {} (partition key: {}",
            gsi.name,
            format_key(&gsi.partition_key)
        );
        if let Some(sk) = &gsi.sort_key {
            line.push_str(&format!(", sort key: {}", format_key(sk)));
        }
        line.push_str(&format!(", projection: {})", format_projection(&gsi.projection)));
        lines.push(line);
    }

    lines
}

fn format_key(key: &KeyAttribute) -> String {
    let code = match key.attribute_type {
        AttributeType::String => "S",
        AttributeType::Number => "N",
        AttributeType::Binary => "B",
    };
    format!("{} ({code})", key.name)
}

fn format_projection(projection: &Projection) -> String {
    match projection {
        Projection::All => "ALL".to_string(),
        Projection::KeysOnly => "KEYS_ONLY".to_string(),
        Projection::Include(attrs) => format!("INCLUDE {}", attrs.join(", ")),
    }
}
