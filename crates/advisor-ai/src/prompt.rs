//! Prompt construction.

use advisor_core::traits::{CompletionRequest, ResponseFormat};
use advisor_core::types::RecommendationRequest;
use serde::{Deserialize, Serialize};

/// System instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "You are a professional stock market analyst. \
Always respond with a single valid JSON object and nothing else: no markdown, no commentary.";

/// The exact JSON shape the model must return.
pub const RESPONSE_SCHEMA: &str = r#"{
  "recommendation": "BUY" or "SELL" or "HOLD",
  "confidence": (number between 0.0 and 1.0),
  "targetPrice": (number),
  "stopLoss": (number),
  "reasoning": "detailed analysis",
  "risks": ["risk1", "risk2", "risk3"],
  "catalysts": ["catalyst1", "catalyst2", "catalyst3"]
}"#;

/// Model parameters for the completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: "meta-llama/Llama-3.3-70B-Instruct-Turbo".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

fn opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

/// Render the user prompt. Same request, same text.
pub fn build_prompt(request: &RecommendationRequest) -> String {
    let quote = &request.quote;
    let ind = &request.indicators;
    let mut out = String::with_capacity(1536);

    out.push_str(
        "Analyze the following stock data and provide a trading recommendation.\n\
         Format your response EXACTLY as a JSON object with the specified structure.\n\n",
    );

    out.push_str(&format!("Stock: {}\n", request.symbol));
    out.push_str(&format!("Price: ${:.2}\n", quote.price));
    out.push_str(&format!("Change: {:.2} ({:.2}%)\n", quote.change, quote.percent_change));
    out.push_str(&format!("Volume: {:.0}\n", quote.volume));
    if let Some(cap) = quote.market_cap {
        out.push_str(&format!("Market Cap: ${:.2}B\n", cap / 1e9));
    }
    if let (Some(high), Some(low)) = (quote.fifty_two_week_high, quote.fifty_two_week_low) {
        out.push_str(&format!("52 Week Range: ${low:.2} - ${high:.2}\n"));
    }

    out.push_str("\nTechnical Indicators:\n");
    out.push_str(&format!("RSI (14): {:.2}\n", ind.rsi));
    out.push_str(&format!(
        "MACD: line {:.4}, signal {:.4}, histogram {:.4}\n",
        ind.macd.line, ind.macd.signal, ind.macd.histogram
    ));
    out.push_str(&format!(
        "SMA20: {}, SMA50: {}, SMA200: {}\n",
        opt(ind.sma20),
        opt(ind.sma50),
        opt(ind.sma200)
    ));
    out.push_str(&format!(
        "Trend: {} ({})\n",
        ind.trend.as_str(),
        ind.trend_strength.as_str()
    ));
    out.push_str(&format!("Support: ${:.2}\n", ind.support));
    out.push_str(&format!("Resistance: ${:.2}\n", ind.resistance));
    out.push_str(&format!("Volume Ratio: {:.2}x\n", ind.volume_ratio));

    if !request.signals.is_empty() {
        out.push_str("\nSignals:\n");
        for signal in &request.signals {
            out.push_str(&format!(
                "- {}: {} ({:?})\n",
                signal.signal_type.as_str(),
                signal.reason,
                signal.strength
            ));
        }
    }

    out.push_str(&format!("\nRequired JSON Structure:\n{RESPONSE_SCHEMA}\n\n"));
    out.push_str(
        "Ensure the response is a valid JSON object matching this exact structure.\n\
         Do not include any additional text before or after the JSON object.",
    );

    out
}

/// Full completion request for a recommendation.
pub fn completion_request(request: &RecommendationRequest, settings: &ModelSettings) -> CompletionRequest {
    CompletionRequest {
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        user_prompt: build_prompt(request),
        model: settings.model.clone(),
        temperature: settings.temperature,
        max_tokens: settings.max_tokens,
        response_format: ResponseFormat::Json,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use advisor_core::types::{
        IndicatorSnapshot, MacdOutput, Quote, Signal, SignalStrength, SignalType, Symbol, Trend,
        TrendStrength,
    };

    pub(crate) fn sample_request() -> RecommendationRequest {
        let symbol = Symbol::parse("AAPL").unwrap();
        RecommendationRequest {
            symbol: symbol.clone(),
            quote: Quote {
                symbol,
                price: 187.5,
                change: 2.25,
                percent_change: 1.21,
                volume: 52_000_000.0,
                market_cap: Some(2.9e12),
                fifty_two_week_high: Some(199.62),
                fifty_two_week_low: Some(164.08),
            },
            indicators: IndicatorSnapshot {
                last_close: 187.5,
                sma20: Some(184.1),
                sma50: Some(180.7),
                sma200: None,
                rsi: 62.4,
                macd: MacdOutput {
                    line: 1.2345,
                    signal: 0.9876,
                    histogram: 0.2469,
                },
                trend: Trend::Bullish,
                trend_strength: TrendStrength::ModerateUp,
                support: 178.0,
                resistance: 190.0,
                current_volume: 52_000_000.0,
                average_volume: 48_000_000.0,
                volume_ratio: 1.083,
                bar_count: 120,
            },
            signals: vec![Signal::new(
                SignalType::Buy,
                "MACD bullish crossover",
                SignalStrength::Moderate,
            )],
        }
    }

    #[test]
    fn test_prompt_embeds_inputs_and_schema() {
        let prompt = build_prompt(&sample_request());

        assert!(prompt.contains("Stock: AAPL"));
        assert!(prompt.contains("Price: $187.50"));
        assert!(prompt.contains("RSI (14): 62.40"));
        assert!(prompt.contains("MACD: line 1.2345, signal 0.9876, histogram 0.2469"));
        assert!(prompt.contains("SMA20: 184.10, SMA50: 180.70, SMA200: n/a"));
        assert!(prompt.contains("Trend: bullish (moderateUp)"));
        assert!(prompt.contains("Market Cap: $2900.00B"));
        assert!(prompt.contains("- BUY: MACD bullish crossover (Moderate)"));
        assert!(prompt.contains(RESPONSE_SCHEMA));
    }

    #[test]
    fn test_prompt_layout() {
        let prompt = build_prompt(&sample_request());

        assert!(prompt.starts_with(
            "Analyze the following stock data and provide a trading recommendation.\n\
             Format your response EXACTLY as a JSON object with the specified structure.\n\n\
             Stock: AAPL\nPrice: $187.50\nChange: 2.25 (1.21%)\nVolume: 52000000\n"
        ));
        assert!(prompt.contains("52 Week Range: $164.08 - $199.62\n\nTechnical Indicators:\nRSI (14)"));
        assert!(prompt.contains("Volume Ratio: 1.08x\n\nSignals:\n- BUY: "));
        assert!(prompt.contains(&format!("\nRequired JSON Structure:\n{RESPONSE_SCHEMA}\n\nEnsure")));
        assert!(prompt.ends_with("before or after the JSON object."));

        let mut quiet = sample_request();
        quiet.signals.clear();
        assert!(!build_prompt(&quiet).contains("Signals:"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let request = sample_request();
        assert_eq!(build_prompt(&request), build_prompt(&request));
    }

    #[test]
    fn test_completion_request_defaults() {
        let completion = completion_request(&sample_request(), &ModelSettings::default());

        assert_eq!(completion.system_instruction, SYSTEM_INSTRUCTION);
        assert_eq!(completion.temperature, 0.7);
        assert_eq!(completion.max_tokens, 1000);
        assert_eq!(completion.response_format, ResponseFormat::Json);
    }
}
