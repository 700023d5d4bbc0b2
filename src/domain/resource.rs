use std::sync::LazyLock;

static USERS: LazyLock<ResourceSpec> = LazyLock::new(users);
static ADDRESS_BOOKS: LazyLock<ResourceSpec> = LazyLock::new(address_books);

/// The record kinds the console manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Users,
    AddressBooks,
}

impl ResourceKind {
    pub fn spec(self) -> &'static ResourceSpec {
        match self {
            ResourceKind::Users => &USERS,
            ResourceKind::AddressBooks => &ADDRESS_BOOKS,
        }
    }

    pub fn all() -> [ResourceKind; 2] {
        [ResourceKind::Users, ResourceKind::AddressBooks]
    }
}

/// Static description of one record kind: where it lives on the backend,
/// which fields its form carries and which columns its list shows. The form,
/// validation and submission machinery is generic over this descriptor.
#[derive(Debug, Clone)]
pub struct ResourceSpec {
    pub kind: ResourceKind,
    /// URL path segment, e.g. `address-books`.
    pub slug: String,
    /// Collection heading, e.g. `Address Books`.
    pub title: String,
    /// Single-record heading, e.g. `Address Book`.
    pub singular: String,
    /// Envelope key for one record in `GET /{slug}/{id}` responses.
    pub record_key: String,
    /// Envelope key for the array in `GET /{slug}` responses.
    pub list_key: String,
    pub fields: Vec<FieldSpec>,
    /// Whether creating a record of this kind asks for a password pair.
    pub credentials: bool,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub widget: Widget,
    pub placeholder: String,
}

impl FieldSpec {
    pub fn text(name: &str, label: &str, placeholder: &str) -> Self {
        FieldSpec {
            name: name.to_string(),
            label: label.to_string(),
            widget: Widget::Text,
            placeholder: placeholder.to_string(),
        }
    }

    pub fn select(name: &str, label: &str, options: &[&str]) -> Self {
        FieldSpec {
            name: name.to_string(),
            label: label.to_string(),
            widget: Widget::Select(options.iter().map(|opt| opt.to_string()).collect()),
            placeholder: String::new(),
        }
    }

    pub fn secret(name: &str, label: &str) -> Self {
        FieldSpec {
            name: name.to_string(),
            label: label.to_string(),
            widget: Widget::Secret,
            placeholder: "••••••••".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    /// Free-form single-line input.
    Text,
    /// One-of selection cycling through fixed options.
    Select(Vec<String>),
    /// Masked input for credentials.
    Secret,
}

/// One list-view column; `path` may be dotted to reach nested objects.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    pub path: String,
}

impl Column {
    fn new(header: &str, path: &str) -> Self {
        Column {
            header: header.to_string(),
            path: path.to_string(),
        }
    }
}

fn base_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("name", "Name", "John Doe"),
        FieldSpec::text("email", "Email", "name@company.com"),
        FieldSpec::text("phone", "Phone", "+8801111111111"),
        FieldSpec::text("website", "Website", "https://example.com"),
        FieldSpec::select("gender", "Gender", &["male", "female", "others"]),
        FieldSpec::text("age", "Age", "28"),
        FieldSpec::text("nationality", "Nationality", "Bangladeshi"),
    ]
}

fn users() -> ResourceSpec {
    ResourceSpec {
        kind: ResourceKind::Users,
        slug: "users".to_string(),
        title: "Users".to_string(),
        singular: "User".to_string(),
        record_key: "user".to_string(),
        list_key: "users".to_string(),
        fields: base_fields(),
        credentials: true,
        columns: vec![
            Column::new("Name", "name"),
            Column::new("Email", "email"),
            Column::new("Website", "website"),
        ],
    }
}

fn address_books() -> ResourceSpec {
    ResourceSpec {
        kind: ResourceKind::AddressBooks,
        slug: "address-books".to_string(),
        title: "Address Books".to_string(),
        singular: "Address Book".to_string(),
        record_key: "addressBook".to_string(),
        list_key: "addressBooks".to_string(),
        fields: base_fields(),
        credentials: false,
        columns: vec![
            Column::new("Name", "name"),
            Column::new("Email", "email"),
            Column::new("Website", "website"),
            Column::new("Phone", "phone"),
            Column::new("Created By", "user.name"),
        ],
    }
}
