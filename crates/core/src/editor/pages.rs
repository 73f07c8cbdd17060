//! Built-in page declarations and their default documents.

use serde_json::{json, Value};

use super::schema::{FieldGroup, FieldSpec, PageSchema, SchemaError};
use crate::document::TypeKey;

/// Lookup of page schemas by type key, in declaration order.
#[derive(Debug, Clone)]
pub struct PageRegistry {
    pages: Vec<PageSchema>,
}

impl PageRegistry {
    pub fn new(pages: Vec<PageSchema>) -> Self {
        Self { pages }
    }

    /// Registry of the site's built-in pages.
    pub fn builtin() -> Result<Self, SchemaError> {
        Ok(Self::new(builtin_pages()?))
    }

    pub fn get(&self, type_key: &TypeKey) -> Option<&PageSchema> {
        self.pages.iter().find(|p| &p.type_key == type_key)
    }

    pub fn pages(&self) -> &[PageSchema] {
        &self.pages
    }

    /// Default document for `type_key`, or `{}` for undeclared keys.
    pub fn default_for(&self, type_key: &TypeKey) -> Value {
        self.get(type_key)
            .map(|p| p.default_document.clone())
            .unwrap_or_else(|| json!({}))
    }
}

pub fn builtin_pages() -> Result<Vec<PageSchema>, SchemaError> {
    Ok(vec![home()?, about()?, services()?, pricing_transport()?, contact()?])
}

fn home() -> Result<PageSchema, SchemaError> {
    PageSchema::new(
        "home",
        "Home",
        json!({
            "hero": {
                "title": "Motorcycle service you can trust",
                "subtitle": "Repairs, tuning and transport for every make.",
                "image": "",
                "ctaLabel": "Book a visit"
            },
            "highlights": [
                {"title": "Certified mechanics", "text": "Over 15 years of experience with two wheels."},
                {"title": "Fast turnaround", "text": "Most services done within 48 hours."},
                {"title": "Pick-up and delivery", "text": "We collect your bike and bring it back."}
            ],
            "gallery": []
        }),
        vec![
            FieldGroup::new(
                "Hero",
                vec![
                    FieldSpec::text("Title", "hero.title")?,
                    FieldSpec::textarea("Subtitle", "hero.subtitle")?,
                    FieldSpec::image("Background image", "hero.image")?,
                    FieldSpec::text("Button label", "hero.ctaLabel")?,
                ],
            ),
            FieldGroup::new(
                "Highlights",
                vec![FieldSpec::list(
                    "Highlights",
                    "highlights",
                    vec![
                        FieldSpec::text("Title", "title")?,
                        FieldSpec::textarea("Text", "text")?,
                    ],
                    json!({"title": "", "text": ""}),
                )?],
            ),
            FieldGroup::new(
                "Gallery",
                vec![FieldSpec::list(
                    "Slides",
                    "gallery",
                    vec![
                        FieldSpec::image("Image", "image")?,
                        FieldSpec::text("Caption", "caption")?,
                    ],
                    json!({"image": "", "caption": ""}),
                )?],
            ),
        ],
    )
}

fn about() -> Result<PageSchema, SchemaError> {
    PageSchema::new(
        "about",
        "About us",
        json!({
            "intro": {
                "title": "About us",
                "text": "A family workshop run by riders, for riders.",
                "image": ""
            },
            "team": [
                {"name": "Owner", "role": "Head mechanic", "bio": "", "photo": ""}
            ]
        }),
        vec![
            FieldGroup::new(
                "Introduction",
                vec![
                    FieldSpec::text("Title", "intro.title")?,
                    FieldSpec::textarea("Text", "intro.text")?,
                    FieldSpec::image("Image", "intro.image")?,
                ],
            ),
            FieldGroup::new(
                "Team",
                vec![FieldSpec::list(
                    "Members",
                    "team",
                    vec![
                        FieldSpec::text("Name", "name")?,
                        FieldSpec::text("Role", "role")?,
                        FieldSpec::textarea("Bio", "bio")?,
                        FieldSpec::image("Photo", "photo")?,
                    ],
                    json!({"name": "", "role": "", "bio": "", "photo": ""}),
                )?],
            ),
        ],
    )
}

fn services() -> Result<PageSchema, SchemaError> {
    PageSchema::new(
        "services-serwis",
        "Services: workshop",
        json!({
            "hero": {
                "title": "Workshop",
                "subtitle": "Everything your motorcycle needs."
            },
            "services": [
                {"name": "Periodic inspection", "description": "Oil, filters, brakes and chain.", "image": ""},
                {"name": "Tyre change", "description": "Fitting and balancing.", "image": ""},
                {"name": "Diagnostics", "description": "Computer diagnostics for modern bikes.", "image": ""}
            ]
        }),
        vec![
            FieldGroup::new(
                "Header",
                vec![
                    FieldSpec::text("Title", "hero.title")?,
                    FieldSpec::textarea("Subtitle", "hero.subtitle")?,
                ],
            ),
            FieldGroup::new(
                "Services",
                vec![FieldSpec::list(
                    "Services",
                    "services",
                    vec![
                        FieldSpec::text("Name", "name")?,
                        FieldSpec::textarea("Description", "description")?,
                        FieldSpec::image("Image", "image")?,
                    ],
                    json!({"name": "", "description": "", "image": ""}),
                )?],
            ),
        ],
    )
}

fn pricing_transport() -> Result<PageSchema, SchemaError> {
    PageSchema::new(
        "pricing-transport",
        "Pricing: transport",
        json!({
            "title": "Transport prices",
            "intro": "Prices include loading and securing the motorcycle.",
            "categories": [
                {"name": "Local", "rows": [
                    {"service": "Up to 20 km", "price": "150 PLN"},
                    {"service": "20-50 km", "price": "250 PLN"}
                ]},
                {"name": "Long distance", "rows": [
                    {"service": "Per km above 50 km", "price": "3 PLN"}
                ]},
                {"name": "Extras", "rows": [
                    {"service": "Non-running motorcycle", "price": "+50 PLN"}
                ]}
            ],
            "note": "Final price confirmed when booking."
        }),
        vec![
            FieldGroup::new(
                "Header",
                vec![
                    FieldSpec::text("Title", "title")?,
                    FieldSpec::textarea("Introduction", "intro")?,
                ],
            ),
            FieldGroup::new(
                "Price tables",
                vec![FieldSpec::list(
                    "Categories",
                    "categories",
                    vec![
                        FieldSpec::text("Category", "name")?,
                        FieldSpec::list(
                            "Rows",
                            "rows",
                            vec![
                                FieldSpec::text("Service", "service")?,
                                FieldSpec::text("Price", "price")?,
                            ],
                            json!({"service": "", "price": ""}),
                        )?,
                    ],
                    json!({"name": "", "rows": []}),
                )?],
            ),
            FieldGroup::new("Footer", vec![FieldSpec::textarea("Note", "note")?]),
        ],
    )
}

fn contact() -> Result<PageSchema, SchemaError> {
    PageSchema::new(
        "contact",
        "Contact",
        json!({
            "title": "Contact",
            "address": "",
            "phone": "",
            "email": "",
            "hours": [
                {"days": "Mon-Fri", "time": "8:00-17:00"},
                {"days": "Sat", "time": "9:00-13:00"}
            ],
            "mapUrl": ""
        }),
        vec![
            FieldGroup::new(
                "Details",
                vec![
                    FieldSpec::text("Title", "title")?,
                    FieldSpec::textarea("Address", "address")?,
                    FieldSpec::text("Phone", "phone")?,
                    FieldSpec::text("Email", "email")?,
                    FieldSpec::text("Map link", "mapUrl")?,
                ],
            ),
            FieldGroup::new(
                "Opening hours",
                vec![FieldSpec::list(
                    "Hours",
                    "hours",
                    vec![
                        FieldSpec::text("Days", "days")?,
                        FieldSpec::text("Time", "time")?,
                    ],
                    json!({"days": "", "time": ""}),
                )?],
            ),
        ],
    )
}
