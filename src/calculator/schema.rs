//! Calculator input schemas
//!
//! Every input field declares the role it plays in the calculation, so
//! engines look inputs up by role rather than by field id or label.
//! Schemas are checked once with `validate` when they are defined.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::catalog::CalculatorCategory;
use crate::error::{CalcError, CalcResult};

/// What an input means to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldRole {
    MonthlyContribution,
    Principal,
    AnnualRate,
    TermYears,
    VehicleCost,
    MonthlyIncome,
    DownPayment,
    LoanTenure,
    Inflation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputField {
    pub id: String,
    pub label: String,
    pub role: FieldRole,
    pub default: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub required: bool,
    pub error_message: String,
}

impl InputField {
    pub fn new(id: &str, label: &str, role: FieldRole, default: f64, min: f64, max: f64, step: f64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            role,
            default,
            min,
            max,
            step,
            required: true,
            error_message: format!("{} must be between {} and {}", label, min, max),
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_error_message(mut self, message: &str) -> Self {
        self.error_message = message.to_string();
        self
    }

    pub fn accepts(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorSchema {
    pub id: String,
    pub name: String,
    pub category: CalculatorCategory,
    pub inputs: Vec<InputField>,
}

impl CalculatorSchema {
    /// Check the schema is internally consistent
    pub fn validate(&self) -> CalcResult<()> {
        let mut ids = HashSet::new();
        let mut roles = HashSet::new();

        for field in &self.inputs {
            if !ids.insert(field.id.as_str()) {
                return Err(CalcError::Schema(format!("{}: duplicate field id {}", self.id, field.id)));
            }
            if !roles.insert(field.role) {
                return Err(CalcError::Schema(format!(
                    "{}: role {:?} bound to more than one field",
                    self.id, field.role
                )));
            }
            if !(field.min <= field.max) {
                return Err(CalcError::Schema(format!("{}: {} has min above max", self.id, field.id)));
            }
            if !field.accepts(field.default) {
                return Err(CalcError::Schema(format!(
                    "{}: {} default {} outside {}..={}",
                    self.id, field.id, field.default, field.min, field.max
                )));
            }
            if !(field.step > 0.0) {
                return Err(CalcError::Schema(format!("{}: {} step must be positive", self.id, field.id)));
            }
        }
        Ok(())
    }

    /// Map submitted values (keyed by field id) to role-keyed inputs
    ///
    /// Missing required fields are errors; missing optional fields are
    /// left out so the engine applies its own default.
    pub fn resolve(&self, submitted: &HashMap<String, f64>) -> CalcResult<ResolvedInputs> {
        if let Some(unknown) = submitted.keys().find(|k| !self.inputs.iter().any(|f| &f.id == *k)) {
            return Err(CalcError::Schema(format!("{}: unknown field {}", self.id, unknown)));
        }

        let mut values = HashMap::with_capacity(self.inputs.len());
        for field in &self.inputs {
            match submitted.get(&field.id) {
                Some(&value) if field.accepts(value) => {
                    values.insert(field.role, value);
                }
                Some(_) => {
                    return Err(CalcError::OutOfRange {
                        field: field.id.clone(),
                        message: field.error_message.clone(),
                    });
                }
                None if field.required => {
                    return Err(CalcError::OutOfRange {
                        field: field.id.clone(),
                        message: format!("{} is required", field.label),
                    });
                }
                None => {}
            }
        }
        Ok(ResolvedInputs { values })
    }
}

/// Inputs keyed by role, ready for an engine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedInputs {
    values: HashMap<FieldRole, f64>,
}

impl ResolvedInputs {
    pub fn get(&self, role: FieldRole) -> Option<f64> {
        self.values.get(&role).copied()
    }

    pub fn require(&self, role: FieldRole) -> CalcResult<f64> {
        self.get(role)
            .ok_or_else(|| CalcError::invalid(format!("missing input for {:?}", role)))
    }

    /// Whole-number input such as a term in years
    pub fn require_years(&self, role: FieldRole) -> CalcResult<u32> {
        let value = self.require(role)?;
        if value < 0.0 || value.fract() != 0.0 {
            return Err(CalcError::invalid(format!("{:?} must be a whole number, got {}", role, value)));
        }
        Ok(value as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::catalog::sip_schema;

    fn submitted(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_resolve_by_role() {
        let schema = sip_schema();
        let inputs = schema
            .resolve(&submitted(&[
                ("monthlyInvestment", 5000.0),
                ("annualReturnRate", 12.0),
                ("investmentPeriod", 10.0),
            ]))
            .unwrap();

        assert_eq!(inputs.get(FieldRole::MonthlyContribution), Some(5000.0));
        assert_eq!(inputs.require_years(FieldRole::TermYears).unwrap(), 10);
        assert_eq!(inputs.get(FieldRole::Inflation), None);
    }

    #[test]
    fn test_out_of_range_uses_field_message() {
        let schema = sip_schema();
        let err = schema
            .resolve(&submitted(&[
                ("monthlyInvestment", 50.0),
                ("annualReturnRate", 12.0),
                ("investmentPeriod", 10.0),
            ]))
            .unwrap_err();

        match err {
            CalcError::OutOfRange { field, message } => {
                assert_eq!(field, "monthlyInvestment");
                assert!(message.contains("₹100"));
            }
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_and_unknown_fields() {
        let schema = sip_schema();
        assert!(matches!(
            schema.resolve(&submitted(&[("monthlyInvestment", 5000.0)])),
            Err(CalcError::OutOfRange { .. })
        ));
        assert!(matches!(
            schema.resolve(&submitted(&[("period", 5.0)])),
            Err(CalcError::Schema(_))
        ));
    }

    #[test]
    fn test_validate_catches_bad_schemas() {
        let mut schema = sip_schema();
        schema.inputs[1].role = FieldRole::MonthlyContribution;
        assert!(matches!(schema.validate(), Err(CalcError::Schema(_))));

        let mut schema = sip_schema();
        schema.inputs[0].default = 1.0;
        assert!(schema.validate().is_err());

        let mut schema = sip_schema();
        schema.inputs[2].id = schema.inputs[0].id.clone();
        assert!(schema.validate().is_err());

        let mut schema = sip_schema();
        schema.inputs[0].step = 0.0;
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_require_years_rejects_fractions() {
        let schema = sip_schema();
        let inputs = schema
            .resolve(&submitted(&[
                ("monthlyInvestment", 5000.0),
                ("annualReturnRate", 12.0),
                ("investmentPeriod", 2.5),
            ]))
            .unwrap();
        assert!(inputs.require_years(FieldRole::TermYears).is_err());
    }
}
