//! Built-in calculator catalog and input schemas

use serde::{Deserialize, Serialize};

use super::schema::{CalculatorSchema, FieldRole, InputField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CalculatorCategory {
    Investment,
    Loan,
    Savings,
    Tax,
    Retirement,
    Insurance,
    Miscellaneous,
}

impl CalculatorCategory {
    pub const ALL: [CalculatorCategory; 7] = [
        CalculatorCategory::Investment,
        CalculatorCategory::Loan,
        CalculatorCategory::Savings,
        CalculatorCategory::Tax,
        CalculatorCategory::Retirement,
        CalculatorCategory::Insurance,
        CalculatorCategory::Miscellaneous,
    ];

    /// URL path segment, e.g. "investment"
    pub fn slug(&self) -> &'static str {
        match self {
            CalculatorCategory::Investment => "investment",
            CalculatorCategory::Loan => "loan",
            CalculatorCategory::Savings => "savings",
            CalculatorCategory::Tax => "tax",
            CalculatorCategory::Retirement => "retirement",
            CalculatorCategory::Insurance => "insurance",
            CalculatorCategory::Miscellaneous => "miscellaneous",
        }
    }
}

/// One entry in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub category: CalculatorCategory,
}

impl CatalogEntry {
    pub fn path(&self) -> String {
        format!("/calculators/{}/{}", self.category.slug(), self.id)
    }
}

macro_rules! entries {
    ($category:ident: $($id:literal => $name:literal),* $(,)?) => {
        [$(CatalogEntry { id: $id, name: $name, category: CalculatorCategory::$category }),*]
    };
}

const INVESTMENT: [CatalogEntry; 14] = entries!(Investment:
    "sip" => "SIP Calculator",
    "swp" => "SWP Calculator",
    "lumpsum" => "Lumpsum Investment Calculator",
    "mutual-fund" => "Mutual Fund Return Calculator",
    "wealth-accumulation" => "Wealth Accumulation Calculator",
    "goal-based-investment" => "Goal-Based Investment Calculator",
    "rd" => "Recurring Deposit (RD) Calculator",
    "fd" => "Fixed Deposit (FD) Calculator",
    "ppf" => "PPF Calculator",
    "elss" => "ELSS Tax Saving Calculator",
    "gold" => "Gold Investment Calculator",
    "stock-return" => "Stock Return Calculator",
    "real-estate" => "Real Estate Investment Calculator",
    "ulip" => "ULIP Calculator",
);

const LOAN: [CatalogEntry; 10] = entries!(Loan:
    "home-loan" => "Home Loan EMI Calculator",
    "car-loan" => "Car Loan EMI Calculator",
    "personal-loan" => "Personal Loan EMI Calculator",
    "education-loan" => "Education Loan EMI Calculator",
    "loan-prepayment" => "Loan Prepayment Calculator",
    "loan-eligibility" => "Loan Eligibility Calculator",
    "balance-transfer" => "Balance Transfer Calculator",
    "emi-only" => "Interest-only EMI Calculator",
    "business-loan" => "Business Loan Calculator",
    "vehicle-affordability" => "Vehicle Affordability Calculator",
);

const SAVINGS: [CatalogEntry; 7] = entries!(Savings:
    "compound-interest" => "Compound Interest Calculator",
    "simple-interest" => "Simple Interest Calculator",
    "wealth-growth" => "Wealth Growth Calculator",
    "emergency-fund" => "Emergency Fund Calculator",
    "savings-goal" => "Savings Goal Calculator",
    "net-worth" => "Net Worth Calculator",
    "retirement-corpus" => "Retirement Corpus Calculator",
);

const TAX: [CatalogEntry; 7] = entries!(Tax:
    "income-tax" => "Income Tax Calculator",
    "hra" => "HRA Exemption Calculator",
    "gratuity" => "Gratuity Calculator",
    "salary-breakup" => "Salary Breakup Calculator",
    "post-tax-return" => "Post-Tax Return Calculator",
    "capital-gains" => "Capital Gains Tax Calculator",
    "advance-tax" => "Advance Tax Calculator",
);

const RETIREMENT: [CatalogEntry; 5] = entries!(Retirement:
    "retirement" => "Retirement Calculator",
    "pension" => "Pension Calculator",
    "annuity" => "Annuity Calculator",
    "inflation-adjusted" => "Inflation-adjusted Retirement Calculator",
    "post-retirement" => "Post-retirement Income Calculator",
);

const INSURANCE: [CatalogEntry; 4] = entries!(Insurance:
    "term-insurance" => "Term Insurance Premium Calculator",
    "life-insurance" => "Life Insurance Need Calculator",
    "health-insurance" => "Health Insurance Premium Calculator",
    "motor-insurance" => "Motor Insurance Premium Calculator",
);

const MISCELLANEOUS: [CatalogEntry; 4] = entries!(Miscellaneous:
    "inflation" => "Inflation Impact Calculator",
    "real-return" => "Real Return Calculator",
    "currency" => "Currency Exchange Calculator",
    "purchasing-power" => "Purchasing Power Calculator",
);

/// Calculators in `category`
pub fn calculators(category: CalculatorCategory) -> &'static [CatalogEntry] {
    match category {
        CalculatorCategory::Investment => &INVESTMENT,
        CalculatorCategory::Loan => &LOAN,
        CalculatorCategory::Savings => &SAVINGS,
        CalculatorCategory::Tax => &TAX,
        CalculatorCategory::Retirement => &RETIREMENT,
        CalculatorCategory::Insurance => &INSURANCE,
        CalculatorCategory::Miscellaneous => &MISCELLANEOUS,
    }
}

pub fn find(id: &str) -> Option<&'static CatalogEntry> {
    CalculatorCategory::ALL
        .iter()
        .flat_map(|c| calculators(*c).iter())
        .find(|entry| entry.id == id)
}

/// Category of a calculator id; unlisted ids are Miscellaneous
pub fn category_of(id: &str) -> CalculatorCategory {
    find(id)
        .map(|entry| entry.category)
        .unwrap_or(CalculatorCategory::Miscellaneous)
}

pub fn sip_schema() -> CalculatorSchema {
    CalculatorSchema {
        id: "sip".to_string(),
        name: "SIP Calculator".to_string(),
        category: CalculatorCategory::Investment,
        inputs: vec![
            InputField::new("monthlyInvestment", "Monthly Investment (₹)", FieldRole::MonthlyContribution, 5000.0, 100.0, 100_000.0, 100.0)
                .with_error_message("Monthly investment must be between ₹100 and ₹1,00,000"),
            InputField::new("annualReturnRate", "Expected Return Rate (% p.a.)", FieldRole::AnnualRate, 12.0, 1.0, 30.0, 0.1)
                .with_error_message("Return rate must be between 1% and 30%"),
            InputField::new("investmentPeriod", "Investment Period (Years)", FieldRole::TermYears, 10.0, 1.0, 50.0, 1.0)
                .with_error_message("Investment period must be between 1 and 50 years"),
            InputField::new("inflationRate", "Inflation (% p.a.)", FieldRole::Inflation, 0.0, 0.0, 20.0, 0.2)
                .optional(),
        ],
    }
}

pub fn emi_schema() -> CalculatorSchema {
    CalculatorSchema {
        id: "home-loan".to_string(),
        name: "Home Loan EMI Calculator".to_string(),
        category: CalculatorCategory::Loan,
        inputs: vec![
            InputField::new("loanAmount", "Loan Amount (₹)", FieldRole::Principal, 1_200_000.0, 10_000.0, 100_000_000.0, 10_000.0),
            InputField::new("interestRate", "Interest Rate (% p.a.)", FieldRole::AnnualRate, 9.0, 0.0, 30.0, 0.05),
            InputField::new("loanTenure", "Loan Tenure (Years)", FieldRole::TermYears, 4.0, 1.0, 30.0, 1.0),
        ],
    }
}

pub fn vehicle_affordability_schema() -> CalculatorSchema {
    CalculatorSchema {
        id: "vehicle-affordability".to_string(),
        name: "Vehicle Affordability Calculator".to_string(),
        category: CalculatorCategory::Loan,
        inputs: vec![
            InputField::new("vehicleCost", "Vehicle Cost (₹)", FieldRole::VehicleCost, 1_000_000.0, 10_000.0, 50_000_000.0, 10_000.0),
            InputField::new("monthlyIncome", "Monthly Income after Tax (₹)", FieldRole::MonthlyIncome, 100_000.0, 0.0, 10_000_000.0, 1000.0),
            InputField::new("downPayment", "Down Payment (₹)", FieldRole::DownPayment, 200_000.0, 0.0, 50_000_000.0, 10_000.0)
                .optional(),
            InputField::new("loanTenure", "Loan Tenure (Years)", FieldRole::LoanTenure, 4.0, 1.0, 10.0, 1.0)
                .optional(),
            InputField::new("interestRate", "Interest Rate (% p.a.)", FieldRole::AnnualRate, 9.0, 0.0, 30.0, 0.05)
                .optional(),
            InputField::new("inflationRate", "Inflation (% p.a.)", FieldRole::Inflation, 0.0, 0.0, 20.0, 0.2)
                .optional(),
        ],
    }
}

/// Every built-in schema
pub fn builtin_schemas() -> Vec<CalculatorSchema> {
    vec![sip_schema(), emi_schema(), vehicle_affordability_schema()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_schemas_are_valid() {
        for schema in builtin_schemas() {
            schema.validate().unwrap();
            assert_eq!(category_of(&schema.id), schema.category);
        }
    }

    #[test]
    fn test_catalog_lookup() {
        assert_eq!(category_of("sip"), CalculatorCategory::Investment);
        assert_eq!(category_of("car-loan"), CalculatorCategory::Loan);
        assert_eq!(category_of("hra"), CalculatorCategory::Tax);
        assert_eq!(category_of("no-such-thing"), CalculatorCategory::Miscellaneous);

        let entry = find("ppf").unwrap();
        assert_eq!(entry.path(), "/calculators/investment/ppf");
    }

    #[test]
    fn test_catalog_ids_unique() {
        let mut ids: Vec<&str> = CalculatorCategory::ALL
            .iter()
            .flat_map(|c| calculators(*c).iter().map(|e| e.id))
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, 51);
    }
}
