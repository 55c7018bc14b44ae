//! Resume content forms: skills and work experience

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fields::{self, Selection};
use crate::schema::{FormSchema, FormValues, Refinement, SchemaResult, ValidationErrors};

pub const SKILL: &str = "skill";
pub const EXPERIENCE: &str = "experience";

pub const SKILL_CATEGORIES: [&str; 6] = [
    "frontend",
    "backend",
    "database",
    "devops",
    "tools",
    "soft-skills",
];
pub const MAX_SKILL_TAGS: usize = 5;

pub const END_DATE_REQUIRED: &str = "End date is required unless this is your current role";
pub const END_BEFORE_START: &str = "End date cannot be before start date";

/// Validated skill entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSubmission {
    pub name: String,
    pub category: String,
    pub proficiency: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SkillSubmission {
    pub fn from_values(values: &FormValues) -> Result<Self, ValidationErrors> {
        Ok(Self {
            name: values.require_text("name")?,
            category: values.require_text("category")?,
            proficiency: values.require_number("proficiency")?,
            color: values.text("color").map(str::to_string),
            tags: values.list("tags").map(<[String]>::to_vec).unwrap_or_default(),
        })
    }
}

/// Validated work experience entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceSubmission {
    pub title: String,
    pub company: String,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExperienceSubmission {
    pub fn from_values(values: &FormValues) -> Result<Self, ValidationErrors> {
        Ok(Self {
            title: values.require_text("title")?,
            company: values.require_text("company")?,
            start_date: values.require_date("startDate")?,
            end_date: values.date("endDate"),
            current: values.flag("current"),
            description: values.text("description").map(str::to_string),
        })
    }
}

pub fn skill_schema() -> SchemaResult<FormSchema> {
    FormSchema::builder(SKILL)
        .field("name", fields::text("Skill name", 1, 50)?)
        .field("category", fields::select("Category", &SKILL_CATEGORIES)?)
        .field(
            "proficiency",
            fields::number("Proficiency", Some(1.0), Some(10.0))?,
        )
        .field("color", fields::color("Color")?.into_optional())
        .field(
            "tags",
            fields::checkbox_group(
                "Tags",
                Selection {
                    min: 0,
                    max: Some(MAX_SKILL_TAGS),
                    allowed: None,
                },
            )?,
        )
        .build()
}

pub fn experience_schema() -> SchemaResult<FormSchema> {
    let earliest = NaiveDate::from_ymd_opt(1970, 1, 1);
    let latest = NaiveDate::from_ymd_opt(2100, 12, 31);

    FormSchema::builder(EXPERIENCE)
        .field("title", fields::text("Job title", 2, 100)?)
        .field("company", fields::text("Company", 2, 100)?)
        .field("startDate", fields::date("Start date", earliest, latest)?)
        .field(
            "endDate",
            fields::date("End date", earliest, latest)?.into_optional(),
        )
        .field("current", fields::checkbox("Current role")?)
        .field(
            "description",
            fields::text("Description", 1, 2000)?.into_optional(),
        )
        .refine(Refinement::required_unless_checked(
            "endDate",
            "current",
            END_DATE_REQUIRED,
        ))
        .refine(Refinement::date_not_before(
            "endDate",
            "startDate",
            END_BEFORE_START,
        ))
        .build()
}

pub fn parse_skill(schema: &FormSchema, input: &Value) -> Result<SkillSubmission, ValidationErrors> {
    SkillSubmission::from_values(&schema.parse(input)?)
}

pub fn parse_experience(
    schema: &FormSchema,
    input: &Value,
) -> Result<ExperienceSubmission, ValidationErrors> {
    ExperienceSubmission::from_values(&schema.parse(input)?)
}
