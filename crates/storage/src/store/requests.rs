#![forbid(unsafe_code)]

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateCreateRequest {
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
}

/// `None` leaves a field untouched. An empty `long_description` clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateUpdateRequest {
    pub template_id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub long_description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepUpdateRequest {
    pub step_id: i64,
    pub text: Option<String>,
    pub order_index: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceUpdateRequest {
    pub reference_id: i64,
    pub url: Option<String>,
    pub reference_type: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstanceCreateRequest {
    pub template_id: i64,
    pub name: String,
    pub description: Option<String>,
    /// ISO date, `YYYY-MM-DD`.
    pub target_date: Option<String>,
}

/// `None` leaves a field untouched. Empty `description`/`target_date`
/// clear them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstanceUpdateRequest {
    pub instance_id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub target_date: Option<String>,
}
