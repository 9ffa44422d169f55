//! Brand onboarding step catalog and option lists

use super::types::{Step, StepKind};

pub const COMPANY_NAME: &str = "company_name";
pub const WEBSITE: &str = "website";
pub const INDUSTRY: &str = "industry";
pub const COMPANY_SIZE: &str = "company_size";
pub const DESCRIPTION: &str = "description";
pub const LOGO: &str = "logo";
pub const PREFERRED_NICHES: &str = "preferred_niches";
pub const TARGET_REGIONS: &str = "target_regions";
pub const ANNUAL_BUDGET: &str = "annual_budget";
pub const CONTACT_NAME: &str = "brand_contact_name";
pub const CONTACT_ROLE: &str = "brand_contact_role";
pub const CONTACT_EMAIL: &str = "brand_contact_email";
pub const CONTACT_PHONE: &str = "brand_contact_phone";
pub const INVITE_TEAM_MEMBERS: &str = "invite_team_members";
pub const TEAM_INVITATIONS: &str = "team_invitations";
pub const REVIEW: &str = "review";

pub const INDUSTRIES: &[&str] = &[
    "Beauty & Cosmetics",
    "Fashion & Apparel",
    "Food & Beverage",
    "Health & Wellness",
    "Technology",
    "Travel & Hospitality",
    "Gaming",
    "Finance",
    "Home & Lifestyle",
    "Other",
];

pub const COMPANY_SIZES: &[&str] = &["1-10", "11-50", "51-200", "201-1000", "1000+"];

pub const ANNUAL_BUDGETS: &[&str] = &[
    "Under $10k",
    "$10k - $50k",
    "$50k - $250k",
    "$250k - $1M",
    "Over $1M",
];

pub const NICHES: &[&str] = &[
    "Beauty",
    "Fashion",
    "Fitness",
    "Food",
    "Gaming",
    "Lifestyle",
    "Parenting",
    "Tech",
    "Travel",
];

pub const REGIONS: &[&str] = &[
    "North America",
    "Latin America",
    "Europe",
    "Middle East",
    "Africa",
    "Asia Pacific",
];

pub const YES_NO: &[&str] = &["yes", "no"];

/// The brand onboarding sequence, in display order
pub fn brand_onboarding_steps() -> Vec<Step> {
    vec![
        Step::new(COMPANY_NAME, "What is your company called?", StepKind::Text),
        Step::new(WEBSITE, "What is your company website?", StepKind::Url)
            .with_hint("e.g. https://acme.com"),
        Step::new(INDUSTRY, "Which industry are you in?", StepKind::Select)
            .with_options(INDUSTRIES),
        Step::new(COMPANY_SIZE, "How big is your company?", StepKind::Radio)
            .with_options(COMPANY_SIZES),
        Step::new(
            DESCRIPTION,
            "Describe your brand in a few sentences",
            StepKind::TextArea,
        ),
        Step::new(LOGO, "Upload your logo", StepKind::Upload)
            .optional()
            .with_hint("Path to a PNG, JPG, SVG or WEBP file up to 5 MB"),
        Step::new(
            PREFERRED_NICHES,
            "Which creator niches fit your brand?",
            StepKind::MultiSelect,
        )
        .with_options(NICHES),
        Step::new(
            TARGET_REGIONS,
            "Which regions do you want to reach?",
            StepKind::MultiSelect,
        )
        .with_options(REGIONS),
        Step::new(
            ANNUAL_BUDGET,
            "What is your annual influencer budget?",
            StepKind::Select,
        )
        .with_options(ANNUAL_BUDGETS),
        Step::new(CONTACT_NAME, "Who is the main contact?", StepKind::Text),
        Step::new(CONTACT_ROLE, "What is their role?", StepKind::Text),
        Step::new(CONTACT_EMAIL, "What is their email address?", StepKind::Email),
        Step::new(CONTACT_PHONE, "What is their phone number?", StepKind::Tel),
        Step::new(
            INVITE_TEAM_MEMBERS,
            "Would you like to invite team members?",
            StepKind::Radio,
        )
        .with_options(YES_NO),
        Step::new(
            TEAM_INVITATIONS,
            "Who should we invite?",
            StepKind::Composite,
        )
        .with_hint("Press Enter after each email address"),
        Step::new(REVIEW, "Review your answers", StepKind::Review),
    ]
}

/// Human-facing field name used in "X is required" messages
pub fn field_label(step_id: &str) -> &'static str {
    match step_id {
        COMPANY_NAME => "Company name",
        WEBSITE => "Website",
        INDUSTRY => "Industry",
        COMPANY_SIZE => "Company size",
        DESCRIPTION => "Description",
        LOGO => "Logo",
        PREFERRED_NICHES => "Preferred niches",
        TARGET_REGIONS => "Target regions",
        ANNUAL_BUDGET => "Annual budget",
        CONTACT_NAME => "Contact name",
        CONTACT_ROLE => "Contact role",
        CONTACT_EMAIL => "Contact email",
        CONTACT_PHONE => "Contact phone",
        INVITE_TEAM_MEMBERS => "Team invitation choice",
        TEAM_INVITATIONS => "Team invitations",
        REVIEW => "Review",
        _ => "Field",
    }
}
