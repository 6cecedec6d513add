// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The registry of instance templates known to this library.
//!
//! Each template publishes a JSON schema describing the instances it accepts,
//! so that callers can validate their input before submitting it, and an
//! example instance.  The registry is built on first use and never changes
//! afterwards.

use std::sync::OnceLock;

use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    DataConfig, DataMode, Error, InstanceDocument, LineConfig, Numeric, QualityConfig,
    StationConfig, StationType, SINGLE_STATION_CELL,
};

static REGISTRY: OnceLock<TemplateRegistry> = OnceLock::new();

/// Returns the process wide template registry.
pub fn registry() -> &'static TemplateRegistry {
    REGISTRY.get_or_init(TemplateRegistry::builtin)
}

/// The set of recognized instance templates.
pub struct TemplateRegistry {
    templates: Vec<Template>,
}

impl TemplateRegistry {
    fn builtin() -> Self {
        Self {
            templates: vec![Template::single_station_cell()],
        }
    }

    /// Returns an iterator over the registered templates.
    pub fn templates(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    /// Returns a short description of every registered template.
    pub fn summaries(&self) -> Vec<TemplateSummary> {
        self.templates.iter().map(Template::summary).collect()
    }

    /// Returns the template with the given name.
    pub fn template(&self, name: &str) -> Result<&Template, Error> {
        self.templates
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| Error::unknown_template(format!("Template {name} not found.")))
    }

    /// Returns the JSON schema of the template with the given name.
    pub fn schema(&self, name: &str) -> Result<&Value, Error> {
        self.template(name).map(|t| &t.schema)
    }
}

/// The name, title and description of a template.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TemplateSummary {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// A recognized instance shape.
pub struct Template {
    name: &'static str,
    title: &'static str,
    description: &'static str,
    required: Vec<RequiredField>,
    fields: Vec<NumericField>,
    schema: Value,
    example: InstanceDocument,
}

/// An instance field the template requires.
struct RequiredField {
    section: &'static str,
    name: &'static str,
    present: fn(&InstanceDocument) -> bool,
}

impl RequiredField {
    fn check(&self, instance: &InstanceDocument) -> Result<(), Error> {
        if (self.present)(instance) {
            return Ok(());
        }
        Err(Error::missing_field(format!(
            "{}.{} is required.",
            self.section, self.name
        )))
    }
}

/// A numeric instance field with the range the template accepts.
struct NumericField {
    section: &'static str,
    name: &'static str,
    minimum: f64,
    exclusive_minimum: bool,
    maximum: Option<f64>,
    default: Option<f64>,
    read: fn(&InstanceDocument) -> Option<&Numeric>,
}

impl NumericField {
    fn path(&self) -> String {
        format!("{}.{}", self.section, self.name)
    }

    fn check(&self, value: &Numeric) -> Result<(), Error> {
        let Some(number) = value.to_f64() else {
            return Err(Error::invalid_numeric(format!(
                "{} must be a real number. Found {value}.",
                self.path()
            )));
        };

        let below = if self.exclusive_minimum {
            number <= self.minimum
        } else {
            number < self.minimum
        };
        let above = self.maximum.is_some_and(|max| number > max);

        if below || above {
            let expected = match (self.exclusive_minimum, self.maximum) {
                (true, None) => format!("greater than {}", self.minimum),
                (false, None) => format!("at least {}", self.minimum),
                (_, Some(max)) => format!("between {} and {max}", self.minimum),
            };
            return Err(Error::invalid_field(format!(
                "{} must be {expected}. Found {number}.",
                self.path()
            )));
        }

        Ok(())
    }

    fn schema(&self) -> Value {
        let mut property = json!({"type": "number"});
        if self.exclusive_minimum {
            property["exclusiveMinimum"] = json!(self.minimum);
        } else {
            property["minimum"] = json!(self.minimum);
        }
        if let Some(maximum) = self.maximum {
            property["maximum"] = json!(maximum);
        }
        if let Some(default) = self.default {
            property["default"] = json!(default);
        }
        property
    }
}

impl Template {
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn title(&self) -> &str {
        self.title
    }

    pub fn description(&self) -> &str {
        self.description
    }

    /// The JSON schema of the instances this template accepts.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// An instance that satisfies the schema.
    pub fn example(&self) -> &InstanceDocument {
        &self.example
    }

    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary {
            name: self.name,
            title: self.title,
            description: self.description,
        }
    }

    /// Checks that the instance has the fields the template requires, and
    /// the values present in it against the ranges and enumerations of the
    /// template.
    pub fn validate(&self, instance: &InstanceDocument) -> Result<(), Error> {
        self.validate_values(instance).inspect_err(|err| {
            tracing::warn!("Instance rejected by template {}: {err}", self.name);
        })
    }

    fn validate_values(&self, instance: &InstanceDocument) -> Result<(), Error> {
        for field in &self.required {
            field.check(instance)?;
        }

        if let Some(LineConfig {
            line_name: Some(name),
            ..
        }) = &instance.line
        {
            if name.trim().is_empty() {
                return Err(Error::invalid_field("line.line_name must not be empty."));
            }
        }

        if let Some(StationConfig {
            station_type: Some(StationType::Other(other)),
            ..
        }) = &instance.station
        {
            return Err(Error::invalid_field(format!(
                "station.type must be one of {}. Found {other}.",
                StationType::KNOWN.join(", ")
            )));
        }

        if let Some(DataConfig {
            mode: Some(DataMode::Other(other)),
            ..
        }) = &instance.data
        {
            return Err(Error::invalid_field(format!(
                "data.mode must be one of {}. Found {other}.",
                DataMode::KNOWN.join(", ")
            )));
        }

        for field in &self.fields {
            if let Some(value) = (field.read)(instance) {
                field.check(value)?;
            }
        }

        Ok(())
    }

    fn single_station_cell() -> Self {
        let required = vec![
            RequiredField {
                section: "line",
                name: "line_name",
                present: |i| i.line.as_ref().is_some_and(|l| l.line_name.is_some()),
            },
            RequiredField {
                section: "line",
                name: "shift_hours",
                present: |i| i.line.as_ref().is_some_and(|l| l.shift_hours.is_some()),
            },
            RequiredField {
                section: "line",
                name: "target_throughput_pph",
                present: |i| i.line.as_ref().is_some_and(|l| l.target_throughput_pph.is_some()),
            },
            RequiredField {
                section: "station",
                name: "id",
                present: |i| i.station.as_ref().is_some_and(|s| s.id.is_some()),
            },
            RequiredField {
                section: "station",
                name: "type",
                present: |i| i.station.as_ref().is_some_and(|s| s.station_type.is_some()),
            },
            RequiredField {
                section: "station",
                name: "cycle_time_s",
                present: |i| i.station.as_ref().is_some_and(|s| s.cycle_time_s.is_some()),
            },
            RequiredField {
                section: "station",
                name: "availability_pct",
                present: |i| i.station.as_ref().is_some_and(|s| s.availability_pct.is_some()),
            },
        ];

        let fields = vec![
            NumericField {
                section: "line",
                name: "shift_hours",
                minimum: 0.5,
                exclusive_minimum: false,
                maximum: Some(24.0),
                default: None,
                read: |i| i.line.as_ref()?.shift_hours.as_ref(),
            },
            NumericField {
                section: "line",
                name: "target_throughput_pph",
                minimum: 0.0,
                exclusive_minimum: true,
                maximum: None,
                default: None,
                read: |i| i.line.as_ref()?.target_throughput_pph.as_ref(),
            },
            NumericField {
                section: "station",
                name: "cycle_time_s",
                minimum: 1.0,
                exclusive_minimum: false,
                maximum: Some(600.0),
                default: None,
                read: |i| i.station.as_ref()?.cycle_time_s.as_ref(),
            },
            NumericField {
                section: "station",
                name: "availability_pct",
                minimum: 50.0,
                exclusive_minimum: false,
                maximum: Some(99.9),
                default: None,
                read: |i| i.station.as_ref()?.availability_pct.as_ref(),
            },
            NumericField {
                section: "station",
                name: "setup_time_s",
                minimum: 0.0,
                exclusive_minimum: false,
                maximum: Some(900.0),
                default: Some(0.0),
                read: |i| i.station.as_ref()?.setup_time_s.as_ref(),
            },
            NumericField {
                section: "station",
                name: "scrap_rate_pct",
                minimum: 0.0,
                exclusive_minimum: false,
                maximum: Some(20.0),
                default: Some(0.5),
                read: |i| i.station.as_ref()?.scrap_rate_pct.as_ref(),
            },
            NumericField {
                section: "quality",
                name: "rework_cycle_time_s",
                minimum: 1.0,
                exclusive_minimum: false,
                maximum: Some(900.0),
                default: Some(60.0),
                read: |i| i.quality.as_ref()?.rework_cycle_time_s.as_ref(),
            },
        ];

        let title = "Single station cell";
        let mut schema = json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "title": title,
            "type": "object",
            "required": [],
            "properties": {
                "line": {
                    "type": "object",
                    "required": [],
                    "properties": {
                        "line_name": {"type": "string", "minLength": 1}
                    }
                },
                "station": {
                    "type": "object",
                    "required": [],
                    "properties": {
                        "id": {"type": "string"},
                        "type": {"type": "string", "enum": StationType::KNOWN}
                    }
                },
                "quality": {
                    "type": "object",
                    "properties": {
                        "inspection_enabled": {"type": "boolean", "default": true},
                        "rework_enabled": {"type": "boolean", "default": false}
                    }
                },
                "data": {
                    "type": "object",
                    "properties": {
                        "mode": {"type": "string", "enum": DataMode::KNOWN, "default": "simulation"},
                        "endpoint": {"type": "string"},
                        "topic": {"type": "string"}
                    }
                }
            }
        });
        for field in &fields {
            schema["properties"][field.section]["properties"][field.name] = field.schema();
        }
        for field in &required {
            if let Some(sections) = schema["required"].as_array_mut() {
                if !sections.contains(&json!(field.section)) {
                    sections.push(json!(field.section));
                }
            }
            if let Some(names) = schema["properties"][field.section]["required"].as_array_mut() {
                names.push(json!(field.name));
            }
        }

        let example = InstanceDocument {
            line: Some(LineConfig {
                line_name: Some("Cell_1".to_string()),
                shift_hours: Some(8_i64.into()),
                target_throughput_pph: Some(200_i64.into()),
            }),
            station: Some(StationConfig {
                id: Some("S1".to_string()),
                station_type: Some(StationType::Assembly),
                cycle_time_s: Some(18_i64.into()),
                availability_pct: Some(95_i64.into()),
                setup_time_s: Some(5_i64.into()),
                scrap_rate_pct: Some(0.8.into()),
            }),
            quality: Some(QualityConfig {
                inspection_enabled: Some(true),
                rework_enabled: Some(false),
                rework_cycle_time_s: Some(60_i64.into()),
                ..Default::default()
            }),
            data: Some(DataConfig {
                mode: Some(DataMode::Simulation),
                ..Default::default()
            }),
        };

        Self {
            name: SINGLE_STATION_CELL,
            title,
            description: "One production line with a single station between a source and a sink.",
            required,
            fields,
            schema,
            example,
        }
    }
}
