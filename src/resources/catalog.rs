/// Mapping table from resource to REST endpoints and declared fields
///
/// Every operation module reads its paths, envelope key and field lists from here;
/// adding a resource means adding a row.

use super::Resource;

/// How a declared field is read from parameters and written to the request body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain string
    Text,
    /// Numeric value (sent as a JSON number)
    Number,
    /// List of referenced record IDs
    IdList,
    /// Deal line items: `[{ serviceId, quantity }]`
    Services,
    /// Tenant-defined custom columns: `[{ columnId, value }]`
    CustomFieldValues,
}

/// A named request-body field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

/// How option loaders label records of this resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionLabel {
    /// `name` field
    Name,
    /// `firstName lastName`
    PersonName,
}

/// Endpoint and field catalog for one resource
#[derive(Debug)]
pub struct ResourceDescriptor {
    pub resource: Resource,
    /// Capitalised name used in messages ("Contact")
    pub display_name: &'static str,
    /// Path segment under `/api/v1` ("contacts")
    pub collection: &'static str,
    /// Key wrapping a single entity in responses ("contact")
    pub envelope: &'static str,
    /// Parameter holding the record ID ("contactId")
    pub id_param: &'static str,
    /// Fields required on create (top-level parameters)
    pub required: &'static [FieldSpec],
    /// Fields optional on create (`additionalFields`), always sent with `[]` defaults
    pub optional: &'static [FieldSpec],
    /// Accepted `sortBy` values for getAll
    pub sort_fields: &'static [&'static str],
    pub option_label: OptionLabel,
}

impl ResourceDescriptor {
    /// Every field accepted by update: required and optional create fields alike
    pub fn update_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.required.iter().chain(self.optional.iter())
    }

    pub fn collection_path(&self) -> String {
        format!("/{}", self.collection)
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("/{}/{}", self.collection, id)
    }

    pub fn search_path(&self) -> String {
        format!("/{}/search", self.collection)
    }

    pub fn configuration_path(&self) -> String {
        format!("/{}/configuration", self.collection)
    }
}

const COMMON_SORT_FIELDS: &[&str] = &["name", "createdAt", "updatedAt"];

pub static CATALOG: [ResourceDescriptor; 5] = [
    ResourceDescriptor {
        resource: Resource::Contact,
        display_name: "Contact",
        collection: "contacts",
        envelope: "contact",
        id_param: "contactId",
        required: &[field("firstName", FieldKind::Text), field("lastName", FieldKind::Text)],
        optional: &[
            field("organizationIds", FieldKind::IdList),
            field("userIds", FieldKind::IdList),
            field("dealIds", FieldKind::IdList),
            field("customFieldValues", FieldKind::CustomFieldValues),
        ],
        sort_fields: COMMON_SORT_FIELDS,
        option_label: OptionLabel::PersonName,
    },
    ResourceDescriptor {
        resource: Resource::Organization,
        display_name: "Organization",
        collection: "organizations",
        envelope: "organization",
        id_param: "organizationId",
        required: &[field("name", FieldKind::Text)],
        optional: &[
            field("contactIds", FieldKind::IdList),
            field("userIds", FieldKind::IdList),
            field("dealIds", FieldKind::IdList),
            field("customFieldValues", FieldKind::CustomFieldValues),
        ],
        sort_fields: COMMON_SORT_FIELDS,
        option_label: OptionLabel::Name,
    },
    ResourceDescriptor {
        resource: Resource::Deal,
        display_name: "Deal",
        collection: "deals",
        envelope: "deal",
        id_param: "dealId",
        required: &[field("name", FieldKind::Text)],
        optional: &[
            field("organizationIds", FieldKind::IdList),
            field("userIds", FieldKind::IdList),
            field("contactIds", FieldKind::IdList),
            field("services", FieldKind::Services),
            field("customFieldValues", FieldKind::CustomFieldValues),
        ],
        sort_fields: COMMON_SORT_FIELDS,
        option_label: OptionLabel::Name,
    },
    ResourceDescriptor {
        resource: Resource::Service,
        display_name: "Service",
        collection: "services",
        envelope: "service",
        id_param: "serviceId",
        required: &[field("name", FieldKind::Text), field("amount", FieldKind::Number)],
        optional: &[
            field("userIds", FieldKind::IdList),
            field("dealIds", FieldKind::IdList),
            field("customFieldValues", FieldKind::CustomFieldValues),
        ],
        sort_fields: COMMON_SORT_FIELDS,
        option_label: OptionLabel::Name,
    },
    ResourceDescriptor {
        resource: Resource::Task,
        display_name: "Task",
        collection: "tasks",
        envelope: "task",
        id_param: "taskId",
        required: &[field("name", FieldKind::Text)],
        optional: &[
            field("userIds", FieldKind::IdList),
            field("customFieldValues", FieldKind::CustomFieldValues),
        ],
        sort_fields: &["name", "type", "createdAt", "updatedAt"],
        option_label: OptionLabel::Name,
    },
];

/// Catalog row for a resource
pub fn descriptor(resource: Resource) -> &'static ResourceDescriptor {
    match resource {
        Resource::Contact => &CATALOG[0],
        Resource::Organization => &CATALOG[1],
        Resource::Deal => &CATALOG[2],
        Resource::Service => &CATALOG[3],
        Resource::Task => &CATALOG[4],
    }
}
