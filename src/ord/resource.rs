//! # Resource Types
//!
//! The kinds of resources an ORD document can declare, named by the segment
//! they use inside ORD IDs (`<namespace>:<type>:<id>[:<version>]`).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceType {
    Vendor,
    Product,
    Package,
    ConsumptionBundle,
    ApiResource,
    EventResource,
    EntityType,
    Capability,
    IntegrationDependency,
    DataProduct,
    Tombstone,
}

impl ResourceType {
    /// Types a tombstone can point at
    pub const TOMBSTONABLE: [ResourceType; 10] = [
        ResourceType::Vendor,
        ResourceType::Product,
        ResourceType::Package,
        ResourceType::ConsumptionBundle,
        ResourceType::ApiResource,
        ResourceType::EventResource,
        ResourceType::EntityType,
        ResourceType::Capability,
        ResourceType::IntegrationDependency,
        ResourceType::DataProduct,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Vendor => "vendor",
            ResourceType::Product => "product",
            ResourceType::Package => "package",
            ResourceType::ConsumptionBundle => "consumptionBundle",
            ResourceType::ApiResource => "apiResource",
            ResourceType::EventResource => "eventResource",
            ResourceType::EntityType => "entityType",
            ResourceType::Capability => "capability",
            ResourceType::IntegrationDependency => "integrationDependency",
            ResourceType::DataProduct => "dataProduct",
            ResourceType::Tombstone => "tombstone",
        }
    }

    /// Human readable name used in validation messages
    pub fn display_name(self) -> &'static str {
        match self {
            ResourceType::Vendor => "vendor",
            ResourceType::Product => "product",
            ResourceType::Package => "package",
            ResourceType::ConsumptionBundle => "bundle",
            ResourceType::ApiResource => "api",
            ResourceType::EventResource => "event",
            ResourceType::EntityType => "entity type",
            ResourceType::Capability => "capability",
            ResourceType::IntegrationDependency => "integration dependency",
            ResourceType::DataProduct => "data product",
            ResourceType::Tombstone => "tombstone",
        }
    }

    /// Resolve the type a tombstone targets from the second segment of its ORD ID
    pub fn from_tombstone_ord_id(ord_id: &str) -> Option<ResourceType> {
        let segment = ord_id.split(':').nth(1)?;
        Self::TOMBSTONABLE
            .into_iter()
            .find(|resource_type| resource_type.as_str() == segment)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tombstone_type_from_second_segment() {
        let cases = [
            ("ns:apiResource:42", Some(ResourceType::ApiResource)),
            ("ns:package:acme:v1", Some(ResourceType::Package)),
            ("sap:vendor:SAP:", Some(ResourceType::Vendor)),
            ("ns:dataProduct:orders:v2", Some(ResourceType::DataProduct)),
            ("ns:tombstone:x", None),
            ("ns:unknown:x", None),
            ("nocolons", None),
        ];

        for (ord_id, expected) in cases {
            assert_eq!(
                ResourceType::from_tombstone_ord_id(ord_id),
                expected,
                "unexpected type for {ord_id}"
            );
        }
    }
}
