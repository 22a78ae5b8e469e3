//! Paycheck row projection.
//!
//! Maps a computed state into the ordered paycheck rows: credits first,
//! then debits, each in a fixed order. A row is emitted only when its
//! amount, rounded to cents, is non-zero. Some labels depend on the
//! adjustment era and the month branch.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{CalculationMonth, CalculatorState, GratificationType, LineKind, ResultRow};

fn push_row(rows: &mut Vec<ResultRow>, code: &str, label: &str, amount: Decimal, kind: LineKind) {
    let amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if !amount.is_zero() {
        rows.push(ResultRow {
            code: code.to_string(),
            label: label.to_string(),
            amount,
            kind,
        });
    }
}

/// Projects a computed state into ordered paycheck rows.
///
/// # Examples
///
/// ```
/// use jmu_payroll::calculation::project_rows;
/// use jmu_payroll::models::{CalculatorState, LineKind};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut state = CalculatorState::default();
/// state.breakdown.base_salary = Decimal::from_str("5455.68").unwrap();
/// state.breakdown.contribution = Decimal::from_str("612.345").unwrap();
///
/// let rows = project_rows(&state);
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].label, "Vencimento");
/// assert_eq!(rows[1].kind, LineKind::Debit);
/// assert_eq!(rows[1].amount, Decimal::from_str("612.35").unwrap());
/// ```
pub fn project_rows(state: &CalculatorState) -> Vec<ResultRow> {
    use LineKind::{Credit, Debit};

    let b = &state.breakdown;
    let legacy = state.period == 0;
    let mut rows = Vec::new();

    push_row(&mut rows, "base_salary", "Vencimento", b.base_salary, Credit);
    push_row(&mut rows, "activity_bonus", "GAJ", b.activity_bonus, Credit);

    let function_label = match state.held_function() {
        Some(code) => format!("Função Comissionada ({})", code.to_uppercase()),
        None => "Função Comissionada".to_string(),
    };
    push_row(&mut rows, "function_value", &function_label, b.function_value, Credit);

    let (title_label, training_label) = if legacy {
        ("AQ Título", "AQ Treinamento")
    } else {
        ("AQ Título (VR)", "AQ Treinamento (VR)")
    };
    push_row(&mut rows, "title_bonus", title_label, b.title_bonus, Credit);
    push_row(&mut rows, "training_bonus", training_label, b.training_bonus, Credit);

    let gratification_label = match state.gratification {
        GratificationType::Gae => "GAE",
        GratificationType::Gas => "GAS",
        GratificationType::None => "Gratificação Específica",
    };
    push_row(&mut rows, "gratification_value", gratification_label, b.gratification_value, Credit);
    push_row(&mut rows, "legal_advantages", "VPNI", b.legal_advantages, Credit);
    push_row(&mut rows, "permanence_bonus", "Abono de Permanência", b.permanence_bonus, Credit);

    if state.overtime.previous_exercise {
        push_row(
            &mut rows,
            "overtime_total",
            "Serviço Extraordinário (EA)",
            b.overtime_total,
            Credit,
        );
    } else {
        push_row(&mut rows, "overtime_50", "Serviço Extraordinário 50%", b.overtime_50, Credit);
        push_row(&mut rows, "overtime_100", "Serviço Extraordinário 100%", b.overtime_100, Credit);
    }

    let substitution_label = if state.substitution.previous_exercise {
        "Substituição (EA)"
    } else {
        "Substituição"
    };
    push_row(&mut rows, "substitution_total", substitution_label, b.substitution_total, Credit);
    push_row(&mut rows, "leave_value", "Licença Compensatória", b.leave_value, Credit);
    push_row(&mut rows, "per_diem_gross", "Diárias", b.per_diem_gross, Credit);
    push_row(&mut rows, "vacation_bonus", "1/3 de Férias", b.vacation_bonus, Credit);

    match state.month {
        CalculationMonth::January | CalculationMonth::June => {
            push_row(
                &mut rows,
                "christmas_advance_base",
                "Adiantamento Gratificação Natalina",
                b.christmas_advance_base,
                Credit,
            );
            push_row(
                &mut rows,
                "christmas_advance_function",
                "Adiantamento Gratificação Natalina (FC/CJ)",
                b.christmas_advance_function,
                Credit,
            );
        }
        CalculationMonth::November => {
            push_row(
                &mut rows,
                "christmas_total",
                "Gratificação Natalina",
                b.christmas_total,
                Credit,
            );
        }
        CalculationMonth::Regular => {}
    }

    push_row(&mut rows, "meal_allowance", "Auxílio-Alimentação", b.meal_allowance, Credit);
    push_row(
        &mut rows,
        "preschool_allowance",
        "Auxílio Pré-Escolar",
        b.preschool_allowance,
        Credit,
    );
    push_row(&mut rows, "transport_credit", "Auxílio-Transporte", b.transport_credit, Credit);

    for extra in state.extras.iter().filter(|extra| extra.kind == Credit) {
        push_row(
            &mut rows,
            &format!("extra.{}", extra.id),
            &extra.description,
            extra.amount,
            Credit,
        );
    }

    push_row(&mut rows, "contribution", "PSS", b.contribution, Debit);
    push_row(&mut rows, "fund_contribution", "Funpresp", b.fund_contribution, Debit);
    push_row(&mut rows, "income_tax", "IRRF", b.income_tax, Debit);
    push_row(
        &mut rows,
        "income_tax_previous_exercise",
        "IRRF (EA)",
        b.income_tax_previous_exercise,
        Debit,
    );
    push_row(&mut rows, "vacation_tax", "IRRF Férias", b.vacation_tax, Debit);
    push_row(
        &mut rows,
        "christmas_contribution",
        "PSS Gratificação Natalina",
        b.christmas_contribution,
        Debit,
    );
    push_row(
        &mut rows,
        "christmas_fund",
        "Funpresp Gratificação Natalina",
        b.christmas_fund,
        Debit,
    );
    push_row(&mut rows, "christmas_tax", "IRRF Gratificação Natalina", b.christmas_tax, Debit);
    push_row(
        &mut rows,
        "christmas_advance_deduction",
        "Desconto Adiantamento Gratificação Natalina",
        b.christmas_advance_deduction,
        Debit,
    );
    push_row(
        &mut rows,
        "vacation_advance",
        "Desconto Adiantamento de Férias",
        state.vacation.advance_discount,
        Debit,
    );
    push_row(&mut rows, "per_diem_discount", "Glosa de Diárias", b.per_diem_discount, Debit);
    push_row(&mut rows, "transport_debit", "Desconto Auxílio-Transporte", b.transport_debit, Debit);
    push_row(&mut rows, "other_discounts", "Outros Descontos", state.other_discounts, Debit);

    for extra in state.extras.iter().filter(|extra| extra.kind == Debit) {
        push_row(
            &mut rows,
            &format!("extra.{}", extra.id),
            &extra.description,
            extra.amount,
            Debit,
        );
    }

    rows
}
