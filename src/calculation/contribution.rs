//! Monthly social-security contribution (PSS), fund contribution and
//! permanence bonus.

use rust_decimal::Decimal;

use crate::models::{AuditStep, PensionElection};

use super::components::BaseComponents;
use super::tax::TaxContext;

/// The result of the monthly contribution calculation.
#[derive(Debug, Clone)]
pub struct ContributionResult {
    /// The contribution base before the ceiling.
    pub raw_base: Decimal,
    /// The contribution base after the ceiling.
    pub base: Decimal,
    /// The social-security contribution.
    pub contribution: Decimal,
    /// The supplementary fund contribution on the excess over the ceiling.
    pub fund: Decimal,
    /// Permanence bonus credit (the contribution, when elected).
    pub permanence_bonus: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the monthly contribution and everything derived from it.
///
/// Under the capped regime the base is clamped to the ceiling and the
/// excess feeds the fund contribution. The permanence bonus reimburses the
/// contribution.
pub fn calculate_contribution(
    components: &BaseComponents,
    pension: &PensionElection,
    tax: &TaxContext<'_>,
    step_number: u32,
) -> ContributionResult {
    let raw_base = components.contribution_sub_base(pension);
    let base = tax.capped_base(raw_base);
    let contribution = tax.contribution_on(raw_base);
    let fund = tax.fund_on(raw_base);
    let permanence_bonus = if pension.permanence_bonus {
        contribution
    } else {
        Decimal::ZERO
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "social_security_contribution".to_string(),
        rule_name: "Social-Security Contribution".to_string(),
        legal_ref: "Lei 10.887/2004, art. 4; EC 103/2019, art. 11".to_string(),
        input: serde_json::json!({
            "raw_base": raw_base.to_string(),
            "regime": pension.regime,
            "include_function": pension.include_function,
            "include_gratification": pension.include_gratification,
            "ceiling": tax.ceiling().map(|ceiling| ceiling.to_string())
        }),
        output: serde_json::json!({
            "base": base.to_string(),
            "contribution": contribution.to_string(),
            "fund": fund.to_string(),
            "permanence_bonus": permanence_bonus.to_string()
        }),
        reasoning: format!(
            "Brackets on {} = {}; fund {} on the excess over the ceiling",
            base, contribution, fund
        ),
    };

    ContributionResult {
        raw_base,
        base,
        contribution,
        fund,
        permanence_bonus,
        audit_step,
    }
}
