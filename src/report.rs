//! Text rendering of the simulation report

use std::io::{self, Write};

use crate::model::Report;

const RULE: &str = "--------------------------------------------------";

// LP APR line is the headline number, bold bright-green in capable terminals
const EMPHASIS: &str = "\x1b[1m\x1b[92m";
const RESET: &str = "\x1b[0m";

/// Format a value as currency: thousands separators, two decimals
pub fn format_currency(value: f64) -> String {
    group_thousands(&format!("{:.2}", value))
}

/// Insert `,` separators into the integer part of an already-formatted number
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Write the report in its fixed two-block layout
///
/// Labels are left-aligned in a 30-column gutter; currency values carry two
/// decimals, the APR four and a percent sign.
pub fn render<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "📊 BNPL Protocol APR & Revenue Simulation")?;
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "{:<30} ${}",
        "> Pool Size:",
        format_currency(report.total_liquidity)
    )?;
    writeln!(
        out,
        "{:<30} {:.2}%",
        "> Utilization:",
        report.utilization_ratio * 100.0
    )?;
    writeln!(
        out,
        "{:<30} ${}",
        "> Annual Loan Volume:",
        format_currency(report.total_annual_loan_volume)
    )?;
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "{}{:<30} {:.4}%{}",
        EMPHASIS, ">> LP APR:", report.lp_apr, RESET
    )?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;
    writeln!(out, "💰 Annual Revenue Breakdown")?;
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "{:<30} ${}",
        "> LP Yield:",
        format_currency(report.lp_revenue)
    )?;
    writeln!(
        out,
        "{:<30} ${}",
        "> Treasury:",
        format_currency(report.treasury_revenue)
    )?;
    writeln!(
        out,
        "{:<30} ${}",
        "> Insurance Fund:",
        format_currency(report.insurance_fund_revenue)
    )?;
    writeln!(
        out,
        "{:<30} ${}",
        "> Liquidators:",
        format_currency(report.liquidator_revenue)
    )?;
    writeln!(out, "{}", RULE)?;
    Ok(())
}
