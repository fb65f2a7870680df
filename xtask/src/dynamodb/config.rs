//! Table configuration types (Functional Core - pure data).

/// Default table name shared with the server's `TABLE_NAME` default.
pub const DEFAULT_TABLE_NAME: &str = "CinemaTable";

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: KeyAttribute,
    pub local_indexes: Vec<LsiConfig>,
    pub billing_mode: BillingMode,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// DynamoDB scalar attribute types used by the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Number,
}

impl AttributeType {
    /// The short DynamoDB type code (`S`, `N`).
    pub fn code(self) -> &'static str {
        match self {
            AttributeType::String => "S",
            AttributeType::Number => "N",
        }
    }
}

/// Local Secondary Index configuration.
///
/// An LSI shares the table's partition key and only declares its own sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LsiConfig {
    pub name: String,
    pub sort_key: KeyAttribute,
    pub projection: ProjectionType,
}

/// Index projection type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionType {
    All,
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    PayPerRequest,
}

impl TableConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }
}

/// Returns the canonical schedule table configuration.
/// This is a pure function - no I/O.
pub fn cinemas_table_config() -> TableConfig {
    TableConfig {
        table_name: DEFAULT_TABLE_NAME.to_string(),
        partition_key: KeyAttribute {
            name: "cinemaId".to_string(),
            attribute_type: AttributeType::Number,
        },
        sort_key: KeyAttribute {
            name: "movieId".to_string(),
            attribute_type: AttributeType::String,
        },
        local_indexes: vec![LsiConfig {
            name: "periodIx".to_string(),
            sort_key: KeyAttribute {
                name: "period".to_string(),
                attribute_type: AttributeType::String,
            },
            projection: ProjectionType::All,
        }],
        billing_mode: BillingMode::PayPerRequest,
    }
}
