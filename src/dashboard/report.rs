// Assembly of the chart-ready JSON summary.

use serde_json::json;
use serde_json::Map as JSMap;

use crate::dashboard::*;

/// Renders the whole dashboard state as one JSON document.
///
/// Single-dataset views (KPIs, radar, bars, demographics, voices) read the
/// active dataset through the hall filter. Cross-dataset views (comparison,
/// trend) read every dataset and come out as `null` until there are at
/// least two. Scores use the 0.0 sentinel where a chart needs a number and
/// `null` where the consumer can render absence.
pub fn build_summary(state: &DashboardState, title: &str) -> DashResult<JSValue> {
    let rows: Vec<SurveyRow> = match state.active_dataset() {
        Some(dataset) => filter_by_hall(&dataset.rows, &state.hall_filter),
        None => Vec::new(),
    };
    let scores = index_scores(&rows);
    let summary = demographics(&rows);
    let trend = trend_series(&state.datasets, &state.hall_filter, &state.trend_index)
        .context(UnknownIndexSnafu {})?;
    let matrix = comparison_matrix(&state.datasets, &state.hall_filter);

    let mut js: JSMap<String, JSValue> = JSMap::new();
    js.insert(
        "config".to_string(),
        json!({
            "title": title,
            "hallFilter": state.hall_filter,
            "trendIndex": state.trend_index,
        }),
    );
    js.insert(
        "datasets".to_string(),
        JSValue::Array(datasets_to_json(state)),
    );
    js.insert("kpis".to_string(), kpis_to_json(&rows, &scores, &summary));
    js.insert(
        "indexRadar".to_string(),
        JSValue::Array(radar_to_json(&scores)),
    );
    js.insert(
        "questionBars".to_string(),
        JSValue::Array(question_bars_to_json(&scores)),
    );
    js.insert("comparison".to_string(), comparison_to_json(&matrix));
    js.insert("trend".to_string(), trend_to_json(&trend));
    js.insert("demographics".to_string(), demographics_to_json(&summary));
    js.insert(
        "voices".to_string(),
        JSValue::Array(voices_to_json(&summary)),
    );
    Ok(JSValue::Object(js))
}

fn datasets_to_json(state: &DashboardState) -> Vec<JSValue> {
    let active_id = state.active_dataset().map(|d| d.id.clone());
    state
        .datasets
        .iter()
        .map(|d| {
            json!({
                "id": d.id,
                "label": d.label,
                "provenance": d.provenance.as_str(),
                "rows": d.rows.len(),
                "year": year_in_label(&d.label),
                "active": active_id.as_deref() == Some(d.id.as_str()),
            })
        })
        .collect()
}

fn kpis_to_json(rows: &[SurveyRow], scores: &[IndexScore], summary: &DemographicSummary) -> JSValue {
    let satisfaction: Option<f64> = scores
        .iter()
        .find(|s| s.key == "satisfaction")
        .and_then(|s| s.score)
        .map(round2);
    json!({
        "responses": rows.len(),
        "satisfaction": satisfaction,
        "raYesRate": summary.ra_yes_rate.map(round2),
    })
}

fn radar_to_json(scores: &[IndexScore]) -> Vec<JSValue> {
    scores
        .iter()
        .map(|s| {
            json!({
                "key": s.key,
                "index": s.label,
                "color": s.color,
                "score": round2(s.score_or_zero()),
            })
        })
        .collect()
}

fn question_bars_to_json(scores: &[IndexScore]) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for s in scores {
        let questions: Vec<JSValue> = s
            .questions
            .iter()
            .map(|q| {
                json!({
                    "question": q.question,
                    "mean": round2(q.mean_or_zero()),
                    "responses": q.responses,
                })
            })
            .collect();
        l.push(json!({
            "key": s.key,
            "index": s.label,
            "color": s.color,
            "questions": questions,
        }));
    }
    l
}

fn comparison_to_json(matrix: &ComparisonMatrix) -> JSValue {
    if matrix.is_empty() {
        return JSValue::Null;
    }
    let rows: Vec<JSValue> = matrix
        .rows
        .iter()
        .map(|row| {
            let scores: Vec<f64> = row.scores.iter().map(|s| s.unwrap_or(0.0)).collect();
            json!({
                "key": row.index_key,
                "index": row.index_label,
                "scores": scores,
            })
        })
        .collect();
    json!({
        "datasets": matrix.columns,
        "rows": rows,
    })
}

fn trend_to_json(series: &TrendSeries) -> JSValue {
    if series.is_empty() {
        return JSValue::Null;
    }
    let points: Vec<JSValue> = series
        .points
        .iter()
        .map(|p| {
            json!({
                "dataset": p.label,
                "year": p.year,
                "score": p.score,
            })
        })
        .collect();
    json!({
        "key": series.index_key,
        "index": series.index_label,
        "color": series.color,
        "points": points,
        "domain": series.domain.map(|(lo, hi)| vec![lo, hi]),
    })
}

fn demographics_to_json(summary: &DemographicSummary) -> JSValue {
    json!({
        "halls": counts_to_json(&summary.halls),
        "classYears": counts_to_json(&summary.class_years),
        "raYesRate": summary.ra_yes_rate.map(round2),
    })
}

fn counts_to_json(counts: &[(String, u32)]) -> Vec<JSValue> {
    counts
        .iter()
        .map(|(name, count)| json!({ "name": name, "count": count }))
        .collect()
}

fn voices_to_json(summary: &DemographicSummary) -> Vec<JSValue> {
    summary
        .voices
        .iter()
        .map(|v| json!({ "question": v.column, "responses": v.responses }))
        .collect()
}
