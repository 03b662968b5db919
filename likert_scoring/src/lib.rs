/*!
Aggregation engine for residence-life survey exports: coerces raw spreadsheet
cells into Likert scores and folds them into per-question means, composite
index scores, cross-dataset comparisons and demographic tabulations.

All entry points are pure functions over immutable row sets. Callers are
expected to re-run them in full whenever the underlying data or filters
change; nothing in this crate caches.

Start with the [quick_start] module for a worked example, and the [manual]
module for the input conventions this crate expects.
*/

pub mod builder;
mod catalog;
pub mod manual;
pub mod quick_start;

use log::debug;
use std::collections::HashMap;

pub use crate::catalog::*;

/// Coerces one raw cell into a Likert score.
///
/// Accepts integers 1 through 5, textual (after trimming) or numeric.
/// Everything else, including 0, 6, blanks and non-integral numbers, is an
/// absent response, not an error.
pub fn likert_score(cell: &CellValue) -> Option<u8> {
    let raw = match cell {
        CellValue::Number(x) if x.fract() == 0.0 => *x as i64,
        CellValue::Number(_) => return None,
        CellValue::Text(s) => match s.trim().parse::<i64>() {
            Ok(x) => x,
            Err(_) => return None,
        },
        CellValue::Empty => return None,
    };
    if (1..=5).contains(&raw) {
        Some(raw as u8)
    } else {
        None
    }
}

/// Finds the administration year in a dataset label: the first standalone
/// run of exactly four digits starting with "20". Longer digit runs such as
/// timestamps do not count.
pub fn year_in_label(label: &str) -> Option<u16> {
    let bytes = label.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let run = &label[start..i];
            if run.len() == 4 && run.starts_with("20") {
                if let Ok(year) = run.parse::<u16>() {
                    return Some(year);
                }
            }
        } else {
            i += 1;
        }
    }
    None
}

/// Keeps the rows whose hall answer equals `hall` after trimming both sides.
/// The sentinel value [HALL_FILTER_ALL] (compared case-insensitively)
/// bypasses filtering. Row order is preserved; zero matches is a valid
/// outcome, not an error.
pub fn filter_by_hall(rows: &[SurveyRow], hall: &str) -> Vec<SurveyRow> {
    let target = hall.trim();
    if target.eq_ignore_ascii_case(HALL_FILTER_ALL) {
        return rows.to_vec();
    }
    let kept: Vec<SurveyRow> = rows
        .iter()
        .filter(|row| row.trimmed(HALL_COLUMN).as_deref() == Some(target))
        .cloned()
        .collect();
    debug!(
        "filter_by_hall: kept {} of {} rows for '{}'",
        kept.len(),
        rows.len(),
        target
    );
    kept
}

/// Computes the mean Likert score of each question over the given rows.
///
/// The output has exactly one entry per requested question, in the same
/// order; questions that match no column or draw no coercible response are
/// still emitted, with a `None` mean. When an eligibility requirement is
/// given, rows failing it are excluded from every question of this batch.
pub fn question_stats(
    rows: &[SurveyRow],
    questions: &[&str],
    eligibility: Option<&Eligibility>,
) -> Vec<QuestionStat> {
    let eligible: Vec<&SurveyRow> = rows
        .iter()
        .filter(|row| eligibility.map_or(true, |e| e.admits(row)))
        .collect();
    if eligibility.is_some() {
        debug!(
            "question_stats: {} of {} rows eligible",
            eligible.len(),
            rows.len()
        );
    }
    questions
        .iter()
        .map(|question| {
            let mut sum: u64 = 0;
            let mut responses: u32 = 0;
            for row in eligible.iter() {
                if let Some(score) = row.cell(question).and_then(likert_score) {
                    sum += score as u64;
                    responses += 1;
                }
            }
            let mean = if responses == 0 {
                None
            } else {
                Some(sum as f64 / responses as f64)
            };
            QuestionStat {
                question: question.to_string(),
                mean,
                responses,
            }
        })
        .collect()
}

/// Scores every index of [INDEX_CATALOG] over the given rows.
///
/// An index score is the unweighted mean of its question means, computed
/// over the questions that have data. Questions without data lower nothing:
/// means [none, 4, 2] average to 3. An index with no data at all scores
/// `None`.
pub fn index_scores(rows: &[SurveyRow]) -> Vec<IndexScore> {
    INDEX_CATALOG
        .iter()
        .map(|def| {
            let questions = question_stats(rows, def.questions, def.eligibility.as_ref());
            let means: Vec<f64> = questions.iter().filter_map(|s| s.mean).collect();
            let score = if means.is_empty() {
                None
            } else {
                Some(means.iter().sum::<f64>() / means.len() as f64)
            };
            IndexScore {
                key: def.key,
                label: def.label,
                color: def.color,
                score,
                questions,
            }
        })
        .collect()
}

fn scores_by_dataset(datasets: &[Dataset], hall: &str) -> Vec<Vec<IndexScore>> {
    datasets
        .iter()
        .map(|dataset| index_scores(&filter_by_hall(&dataset.rows, hall)))
        .collect()
}

/// Builds the index-by-dataset comparison matrix, with every dataset scored
/// independently under the same hall filter.
///
/// Comparison is only meaningful across at least two datasets; with fewer
/// the result is empty and presentation layers show a placeholder instead.
pub fn comparison_matrix(datasets: &[Dataset], hall: &str) -> ComparisonMatrix {
    if datasets.len() < 2 {
        debug!(
            "comparison_matrix: {} dataset(s), nothing to compare",
            datasets.len()
        );
        return ComparisonMatrix::default();
    }
    let scored = scores_by_dataset(datasets, hall);
    let columns: Vec<String> = datasets.iter().map(|d| d.label.clone()).collect();
    let rows = INDEX_CATALOG
        .iter()
        .enumerate()
        .map(|(idx, def)| ComparisonRow {
            index_key: def.key,
            index_label: def.label,
            scores: scored.iter().map(|s| s[idx].score.map(round2)).collect(),
        })
        .collect();
    ComparisonMatrix { columns, rows }
}

/// Builds the year-over-year series of one index across datasets.
///
/// Points are ordered by [OrderKey]: label year when one is detected,
/// insertion position otherwise. Datasets with no data for the index are
/// dropped from the series rather than plotted as zero. Like
/// [comparison_matrix], fewer than two datasets produce an empty series.
pub fn trend_series(
    datasets: &[Dataset],
    hall: &str,
    index_key: &str,
) -> Result<TrendSeries, ScoringError> {
    let (position, def) = INDEX_CATALOG
        .iter()
        .enumerate()
        .find(|(_, d)| d.key == index_key)
        .ok_or_else(|| ScoringError::UnknownIndex(index_key.to_string()))?;
    let mut series = TrendSeries {
        index_key: def.key,
        index_label: def.label,
        color: def.color,
        points: Vec::new(),
        domain: None,
    };
    if datasets.len() < 2 {
        debug!(
            "trend_series: {} dataset(s), no trend to draw",
            datasets.len()
        );
        return Ok(series);
    }
    let scored = scores_by_dataset(datasets, hall);
    let mut keyed: Vec<(OrderKey, TrendPoint)> = Vec::new();
    for (inserted, dataset) in datasets.iter().enumerate() {
        let score = match scored[inserted][position].score {
            Some(s) => round2(s),
            None => {
                debug!(
                    "trend_series: dropping '{}', no data for {}",
                    dataset.label, def.key
                );
                continue;
            }
        };
        let year = year_in_label(&dataset.label);
        keyed.push((
            OrderKey { year, inserted },
            TrendPoint {
                label: dataset.label.clone(),
                year,
                score,
            },
        ));
    }
    keyed.sort_by_key(|(key, _)| *key);
    series.points = keyed.into_iter().map(|(_, point)| point).collect();
    series.domain = trend_domain(&series.points);
    Ok(series)
}

/// Auto-zoomed y-axis range: 0.2 of padding around the observed scores,
/// clamped to the 1..5 Likert scale.
fn trend_domain(points: &[TrendPoint]) -> Option<(f64, f64)> {
    let first = points.first()?;
    let mut lo = first.score;
    let mut hi = first.score;
    for point in &points[1..] {
        lo = lo.min(point.score);
        hi = hi.max(point.score);
    }
    Some((round2((lo - 0.2).max(1.0)), round2((hi + 0.2).min(5.0))))
}

/// Tabulates hall and class-year counts, the RA coverage rate and sampled
/// free-text answers over the given rows.
pub fn demographics(rows: &[SurveyRow]) -> DemographicSummary {
    let mut answered: u32 = 0;
    let mut yes: u32 = 0;
    for row in rows {
        if let Some(answer) = row.trimmed(RA_COLUMN) {
            answered += 1;
            if answer == "Yes" {
                yes += 1;
            }
        }
    }
    let ra_yes_rate = if answered == 0 {
        None
    } else {
        Some(yes as f64 / answered as f64)
    };
    let voices = OPEN_ENDED_COLUMNS
        .iter()
        .map(|&column| VoiceSample {
            column,
            responses: sample_voices(rows, column),
        })
        .collect();
    DemographicSummary {
        halls: count_answers(rows, HALL_COLUMN),
        class_years: count_answers(rows, CLASS_YEAR_COLUMN),
        ra_yes_rate,
        voices,
    }
}

/// Frequency count per distinct trimmed answer, blanks excluded. Sorted by
/// count descending, then answer, so that equal inputs tabulate equally.
fn count_answers(rows: &[SurveyRow], column: &str) -> Vec<(String, u32)> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for row in rows {
        if let Some(answer) = row.trimmed(column) {
            *counts.entry(answer).or_insert(0) += 1;
        }
    }
    let mut pairs: Vec<(String, u32)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    pairs
}

/// First [VOICE_SAMPLE_CAP] distinct non-blank answers, in row order.
fn sample_voices(rows: &[SurveyRow], column: &str) -> Vec<String> {
    let mut sampled: Vec<String> = Vec::new();
    for row in rows {
        if sampled.len() == VOICE_SAMPLE_CAP {
            break;
        }
        if let Some(answer) = row.trimmed(column) {
            if !sampled.contains(&answer) {
                sampled.push(answer);
            }
        }
    }
    sampled
}

/// Rounds to two decimals for display payloads.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DatasetBuilder;

    fn text_row(pairs: &[(&str, &str)]) -> SurveyRow {
        let cells: Vec<(&str, CellValue)> = pairs
            .iter()
            .map(|(column, value)| (*column, CellValue::Text(value.to_string())))
            .collect();
        SurveyRow::from_pairs(&cells)
    }

    fn single_question_rows(question: &str, answers: &[&str]) -> Vec<SurveyRow> {
        answers
            .iter()
            .map(|answer| text_row(&[(question, answer)]))
            .collect()
    }

    fn dataset(label: &str, question: &str, answers: &[&str]) -> Dataset {
        let mut builder = DatasetBuilder::new(label);
        for answer in answers {
            builder.push_text_row(&[(question, answer)]);
        }
        builder.build()
    }

    #[test]
    fn likert_coercion_accepts_integers_one_to_five() {
        let _ = env_logger::try_init();
        assert_eq!(likert_score(&CellValue::Text("3".to_string())), Some(3));
        assert_eq!(likert_score(&CellValue::Text(" 4 ".to_string())), Some(4));
        assert_eq!(likert_score(&CellValue::Number(5.0)), Some(5));
        assert_eq!(likert_score(&CellValue::Number(1.0)), Some(1));
    }

    #[test]
    fn likert_coercion_rejects_everything_else() {
        for cell in [
            CellValue::Empty,
            CellValue::Text("".to_string()),
            CellValue::Text("   ".to_string()),
            CellValue::Text("0".to_string()),
            CellValue::Text("6".to_string()),
            CellValue::Text("abc".to_string()),
            CellValue::Text("4.5".to_string()),
            CellValue::Number(0.0),
            CellValue::Number(6.0),
            CellValue::Number(3.5),
        ] {
            assert_eq!(likert_score(&cell), None, "cell {:?}", cell);
        }
    }

    #[test]
    fn question_stats_preserve_order_and_emit_missing_questions() {
        let rows = single_question_rows("q1", &["5", "3"]);
        let stats = question_stats(&rows, &["q1", "q2"], None);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].question, "q1");
        assert_eq!(stats[0].mean, Some(4.0));
        assert_eq!(stats[0].responses, 2);
        assert_eq!(stats[1].question, "q2");
        assert_eq!(stats[1].mean, None);
        assert_eq!(stats[1].responses, 0);
        assert_eq!(stats[1].mean_or_zero(), 0.0);
    }

    #[test]
    fn index_mean_skips_questions_without_data() {
        let def = index_by_key("belonging").unwrap();
        let rows = vec![
            text_row(&[(def.questions[1], "4"), (def.questions[2], "2")]),
            text_row(&[(def.questions[1], "4"), (def.questions[2], "2")]),
        ];
        let scores = index_scores(&rows);
        let belonging = scores.iter().find(|s| s.key == "belonging").unwrap();
        assert_eq!(belonging.questions[0].mean, None);
        assert_eq!(belonging.score, Some(3.0));
    }

    #[test]
    fn hall_filter_matches_trimmed_and_honors_all_sentinel() {
        let rows = vec![
            text_row(&[(HALL_COLUMN, " Pine Hall ")]),
            text_row(&[(HALL_COLUMN, "Oak Hall")]),
            text_row(&[(HALL_COLUMN, "Pine Hall")]),
        ];
        let pine = filter_by_hall(&rows, "Pine Hall");
        assert_eq!(pine.len(), 2);
        assert_eq!(pine[0], rows[0]);
        assert_eq!(pine[1], rows[2]);
        assert_eq!(filter_by_hall(&rows, "all").len(), 3);
        assert_eq!(filter_by_hall(&rows, "ALL").len(), 3);
        assert!(filter_by_hall(&rows, "Elm Hall").is_empty());
    }

    #[test]
    fn ra_support_only_counts_residents_with_an_ra() {
        let def = index_by_key("ra_support").unwrap();
        let question = def.questions[0];
        let rows = vec![
            text_row(&[(question, "5"), (RA_COLUMN, "Yes")]),
            text_row(&[(question, "1"), (RA_COLUMN, "No")]),
            text_row(&[(question, "1")]),
        ];
        let scores = index_scores(&rows);
        let ra = scores.iter().find(|s| s.key == "ra_support").unwrap();
        assert_eq!(ra.score, Some(5.0));
        assert_eq!(ra.questions[0].responses, 1);
    }

    #[test]
    fn hall_filter_and_eligibility_compose() {
        let def = index_by_key("ra_support").unwrap();
        let question = def.questions[2];
        let rows = vec![
            text_row(&[(HALL_COLUMN, "Pine Hall"), (RA_COLUMN, "Yes"), (question, "5")]),
            text_row(&[(HALL_COLUMN, "Pine Hall"), (RA_COLUMN, "No"), (question, "2")]),
            text_row(&[(HALL_COLUMN, "Oak Hall"), (RA_COLUMN, "Yes"), (question, "1")]),
        ];
        let pine = filter_by_hall(&rows, "Pine Hall");
        let stats = question_stats(&pine, def.questions, def.eligibility.as_ref());
        assert_eq!(stats[2].mean, Some(5.0));
        assert_eq!(stats[2].responses, 1);
    }

    #[test]
    fn year_detection_requires_a_four_digit_token() {
        assert_eq!(year_in_label("ResLife_2026"), Some(2026));
        assert_eq!(year_in_label("fall 2025 export"), Some(2025));
        assert_eq!(year_in_label("survey"), None);
        assert_eq!(year_in_label("export-20250101"), None);
        assert_eq!(year_in_label("1999 survey"), None);
    }

    #[test]
    fn trend_points_sort_by_year_and_drop_missing_data() {
        let question = "Overall, I am satisfied with my housing experience this year";
        let newer = dataset(
            "ResLife_2026",
            question,
            &["4", "4", "4", "4", "4", "4", "4", "4", "4", "5"],
        );
        let older = dataset(
            "ResLife_2025",
            question,
            &["4", "4", "4", "4", "4", "4", "3", "3", "4", "4"],
        );
        let unrelated = dataset("pilot run", "an unrelated question", &["5"]);
        let series = trend_series(&[newer, unrelated, older], HALL_FILTER_ALL, "satisfaction")
            .unwrap();
        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].label, "ResLife_2025");
        assert_eq!(series.points[0].score, 3.8);
        assert_eq!(series.points[1].label, "ResLife_2026");
        assert_eq!(series.points[1].score, 4.1);
        assert_eq!(series.domain, Some((3.6, 4.3)));
    }

    #[test]
    fn datasets_without_a_year_lead_the_trend() {
        let question = "I would choose to live on campus again";
        let no_year = dataset("baseline import", question, &["3"]);
        let with_year = dataset("spring 2024", question, &["4"]);
        let series = trend_series(&[with_year, no_year], HALL_FILTER_ALL, "satisfaction").unwrap();
        assert_eq!(series.points[0].label, "baseline import");
        assert_eq!(series.points[0].year, None);
        assert_eq!(series.points[1].label, "spring 2024");
        assert_eq!(series.points[1].year, Some(2024));
    }

    #[test]
    fn comparisons_need_at_least_two_datasets() {
        let question = "I would recommend my hall to an incoming student";
        let only = dataset("ResLife_2026", question, &["4"]);
        assert!(comparison_matrix(&[only.clone()], HALL_FILTER_ALL).is_empty());
        let series = trend_series(&[only], HALL_FILTER_ALL, "satisfaction").unwrap();
        assert!(series.is_empty());
        assert_eq!(series.domain, None);
    }

    #[test]
    fn trend_rejects_unknown_index_keys() {
        assert_eq!(
            trend_series(&[], HALL_FILTER_ALL, "morale"),
            Err(ScoringError::UnknownIndex("morale".to_string()))
        );
    }

    #[test]
    fn comparison_matrix_rounds_to_two_decimals() {
        let question = "I feel safe in my residence hall at night";
        let a = dataset("ResLife_2025", question, &["5", "3", "3"]);
        let b = dataset("ResLife_2026", question, &["4"]);
        let matrix = comparison_matrix(&[a, b], HALL_FILTER_ALL);
        assert_eq!(
            matrix.columns,
            vec!["ResLife_2025".to_string(), "ResLife_2026".to_string()]
        );
        let safety = matrix.rows.iter().find(|r| r.index_key == "safety").unwrap();
        assert_eq!(safety.scores, vec![Some(3.67), Some(4.0)]);
        let belonging = matrix
            .rows
            .iter()
            .find(|r| r.index_key == "belonging")
            .unwrap();
        assert_eq!(belonging.scores, vec![None, None]);
    }

    #[test]
    fn trend_domain_clamps_to_likert_bounds() {
        let question = "Overall, I am satisfied with my housing experience this year";
        let a = dataset("2024 cohort", question, &["5"]);
        let b = dataset("2025 cohort", question, &["5", "4", "5", "5"]);
        let series = trend_series(&[a, b], HALL_FILTER_ALL, "satisfaction").unwrap();
        assert_eq!(series.domain, Some((4.55, 5.0)));
    }

    #[test]
    fn demographics_tabulate_counts_rates_and_voices() {
        let like = OPEN_ENDED_COLUMNS[0];
        let rows = vec![
            text_row(&[
                (HALL_COLUMN, "Pine Hall"),
                (CLASS_YEAR_COLUMN, "Sophomore"),
                (RA_COLUMN, "Yes"),
                (like, "The lounge"),
            ]),
            text_row(&[
                (HALL_COLUMN, "Pine Hall"),
                (CLASS_YEAR_COLUMN, "Senior"),
                (RA_COLUMN, "Yes"),
                (like, " The lounge "),
            ]),
            text_row(&[(HALL_COLUMN, "Oak Hall"), (RA_COLUMN, "No"), (like, "Quiet floors")]),
            text_row(&[(HALL_COLUMN, " "), (RA_COLUMN, "")]),
        ];
        let summary = demographics(&rows);
        assert_eq!(
            summary.halls,
            vec![("Pine Hall".to_string(), 2), ("Oak Hall".to_string(), 1)]
        );
        assert_eq!(
            summary.class_years,
            vec![("Senior".to_string(), 1), ("Sophomore".to_string(), 1)]
        );
        assert_eq!(summary.ra_yes_rate, Some(2.0 / 3.0));
        assert_eq!(
            summary.voices[0].responses,
            vec!["The lounge".to_string(), "Quiet floors".to_string()]
        );
        assert!(summary.voices[1].responses.is_empty());
    }

    #[test]
    fn voice_samples_cap_at_five_distinct_answers() {
        let change = OPEN_ENDED_COLUMNS[1];
        let answers: Vec<String> = (0..8).map(|i| format!("idea {}", i)).collect();
        let rows: Vec<SurveyRow> = answers
            .iter()
            .map(|answer| text_row(&[(change, answer.as_str())]))
            .collect();
        let summary = demographics(&rows);
        assert_eq!(summary.voices[1].responses.len(), VOICE_SAMPLE_CAP);
        assert_eq!(summary.voices[1].responses[0], "idea 0");
    }
}
