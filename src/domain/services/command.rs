use crate::domain::models::user::User;
use crate::domain::services::permissions::{has_permission, Operation, Resource, ResourceType};
use chrono::{DateTime, Days, Duration, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    Create,
    Update,
    Delete,
    Read,
}

impl CommandAction {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "create" => Some(CommandAction::Create),
            "update" => Some(CommandAction::Update),
            "delete" => Some(CommandAction::Delete),
            "read" => Some(CommandAction::Read),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandAction::Create => "create",
            CommandAction::Update => "update",
            CommandAction::Delete => "delete",
            CommandAction::Read => "read",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Task,
    Appointment,
    Employee,
    Sale,
}

impl CommandKind {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "task" => Some(CommandKind::Task),
            "appointment" => Some(CommandKind::Appointment),
            "employee" => Some(CommandKind::Employee),
            "sale" => Some(CommandKind::Sale),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Task => "task",
            CommandKind::Appointment => "appointment",
            CommandKind::Employee => "employee",
            CommandKind::Sale => "sale",
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        match self {
            CommandKind::Task => ResourceType::Tasks,
            CommandKind::Appointment => ResourceType::Appointments,
            CommandKind::Employee => ResourceType::Employees,
            CommandKind::Sale => ResourceType::Sales,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub action: CommandAction,
    pub kind: CommandKind,
    pub data: Map<String, Value>,
}

static COMMAND_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@(\w+)-(\w+)\s*(.*)$").expect("command pattern"));

static TASK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)"\s+for\s+(\w+)"#).expect("task pattern"));
static APPOINTMENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)"\s+at\s+(.+)"#).expect("appointment pattern"));
static EMPLOYEE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)"\s+(.+)\s+(\w+)"#).expect("employee pattern"));
static SALE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)"\s+(\d+(?:\.\d+)?)"#).expect("sale pattern"));

type FieldMapper = fn(&Captures) -> Option<Map<String, Value>>;

// One pattern and one capture-to-field mapping per resource kind; adding a
// command kind means adding a row here.
fn extraction_rule(kind: CommandKind) -> (&'static Regex, FieldMapper) {
    match kind {
        CommandKind::Task => (&TASK_PATTERN, map_task_fields),
        CommandKind::Appointment => (&APPOINTMENT_PATTERN, map_appointment_fields),
        CommandKind::Employee => (&EMPLOYEE_PATTERN, map_employee_fields),
        CommandKind::Sale => (&SALE_PATTERN, map_sale_fields),
    }
}

/// Classifies a raw chat line. `None` means the text is a free-form question,
/// never an error; a recognized command whose remainder does not match its
/// extraction pattern carries an empty field map (validation happens
/// downstream, in the mutators).
pub fn parse_command(text: &str) -> Option<Command> {
    let caps = COMMAND_PATTERN.captures(text)?;
    let action = CommandAction::from_token(&caps[1])?;
    let kind = CommandKind::from_token(&caps[2])?;
    let remainder = caps.get(3).map(|m| m.as_str()).unwrap_or("");

    if action == CommandAction::Read {
        return Some(Command {
            action,
            kind,
            data: Map::new(),
        });
    }

    let (pattern, map_fields) = extraction_rule(kind);
    let data = pattern
        .captures(remainder)
        .and_then(|caps| map_fields(&caps))
        .unwrap_or_default();

    Some(Command { action, kind, data })
}

fn map_task_fields(caps: &Captures) -> Option<Map<String, Value>> {
    let due_date = Utc::now().date_naive().checked_add_days(Days::new(7))?;
    let mut data = Map::new();
    data.insert("title".to_string(), json!(&caps[1]));
    data.insert("department".to_string(), json!(&caps[2]));
    data.insert("status".to_string(), json!("To Do"));
    data.insert(
        "dueDate".to_string(),
        json!(due_date.format("%Y-%m-%d").to_string()),
    );
    Some(data)
}

fn map_appointment_fields(caps: &Captures) -> Option<Map<String, Value>> {
    let start = parse_datetime_text(caps[2].trim())?;
    let end = start + Duration::hours(1);
    let mut data = Map::new();
    data.insert("title".to_string(), json!(&caps[1]));
    data.insert("startTime".to_string(), json!(start.to_rfc3339()));
    data.insert("endTime".to_string(), json!(end.to_rfc3339()));
    data.insert("clientIds".to_string(), json!([]));
    data.insert("userIds".to_string(), json!([]));
    Some(data)
}

fn map_employee_fields(caps: &Captures) -> Option<Map<String, Value>> {
    let mut data = Map::new();
    data.insert("name".to_string(), json!(&caps[1]));
    data.insert("email".to_string(), json!(caps[2].trim()));
    data.insert("department".to_string(), json!(&caps[3]));
    data.insert("role".to_string(), json!("Employee"));
    Some(data)
}

fn map_sale_fields(caps: &Captures) -> Option<Map<String, Value>> {
    let value: f64 = caps[2].parse().ok()?;
    let mut data = Map::new();
    data.insert("title".to_string(), json!(&caps[1]));
    data.insert("value".to_string(), json!(value));
    data.insert("status".to_string(), json!("Pending"));
    Some(data)
}

fn parse_datetime_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}

/// Maps command vocabulary onto the policy's resource vocabulary and
/// delegates the decision. An actor without a company affiliation is denied
/// outright.
pub fn authorize_command(user: &User, command: &Command) -> bool {
    let company_id = match &user.company_id {
        Some(id) => id.clone(),
        None => return false,
    };

    let operation = match command.action {
        CommandAction::Read => Operation::Read,
        _ => Operation::Write,
    };

    let department = command
        .data
        .get("department")
        .and_then(Value::as_str)
        .map(str::to_string);

    let resource = Resource {
        company_id,
        resource_type: command.kind.resource_type(),
        department,
    };

    has_permission(user, &resource, operation)
}
