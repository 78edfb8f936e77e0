//! Text rendering for analysis reports.

use advisor_ai::AnalysisReport;

fn opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

/// Human-readable summary of a report.
pub fn render_text(report: &AnalysisReport) -> String {
    let q = &report.quote;
    let ind = &report.indicators;
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", report.symbol));
    out.push_str(&format!(
        "Price:       ${:.2} ({:+.2}, {:+.2}%)\n",
        q.price, q.change, q.percent_change
    ));
    if let (Some(low), Some(high)) = (q.fifty_two_week_low, q.fifty_two_week_high) {
        out.push_str(&format!("52w range:   ${low:.2} - ${high:.2}\n"));
    }
    out.push('\n');
    out.push_str(&format!("RSI(14):     {:.2}\n", ind.rsi));
    out.push_str(&format!(
        "MACD:        {:.4} / signal {:.4} / hist {:.4}\n",
        ind.macd.line, ind.macd.signal, ind.macd.histogram
    ));
    out.push_str(&format!(
        "SMA 20/50/200: {} / {} / {}\n",
        opt(ind.sma20),
        opt(ind.sma50),
        opt(ind.sma200)
    ));
    out.push_str(&format!(
        "Trend:       {} ({})\n",
        ind.trend.as_str(),
        ind.trend_strength.as_str()
    ));
    out.push_str(&format!("Support:     ${:.2}\n", ind.support));
    out.push_str(&format!("Resistance:  ${:.2}\n", ind.resistance));
    out.push_str(&format!("Volume:      {:.2}x average\n", ind.volume_ratio));

    out.push('\n');
    if report.signals.is_empty() {
        out.push_str("Signals:     none\n");
    } else {
        out.push_str("Signals:\n");
        for signal in &report.signals {
            out.push_str(&format!(
                "  [{}] {} ({:?})\n",
                signal.signal_type.as_str(),
                signal.reason,
                signal.strength
            ));
        }
    }

    if let Some(rec) = &report.recommendation {
        out.push('\n');
        out.push_str(&format!(
            "Recommendation: {} (confidence {:.0}%)\n",
            rec.recommendation,
            rec.confidence * 100.0
        ));
        out.push_str(&format!("Target:      ${:.2}\n", rec.target_price));
        out.push_str(&format!("Stop loss:   ${:.2}\n", rec.stop_loss));
        out.push_str(&format!("Reasoning:   {}\n", rec.reasoning));
        out.push_str("Risks:\n");
        for risk in &rec.risks {
            out.push_str(&format!("  - {risk}\n"));
        }
        if !rec.catalysts.is_empty() {
            out.push_str("Catalysts:\n");
            for catalyst in &rec.catalysts {
                out.push_str(&format!("  - {catalyst}\n"));
            }
        }
    }

    out
}
