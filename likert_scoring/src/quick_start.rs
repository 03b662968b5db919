/*!

# Quick start with Microsoft Forms

This example shows how to go from an online survey to a scored dashboard
summary end to end. It uses Microsoft Forms because most residence-life
offices already have it through their campus tenant; Google Forms and
Qualtrics exports work the same way once downloaded as CSV.

**Building the survey** Create a form with one *Likert* or *Rating* question
per catalog question, configured to record the numeric value 1 to 5. The
question titles must match the catalog exactly, for example
`I feel a sense of belonging in my hall community`. Add the two demographic
questions (`Which residence hall do you live in?`,
`What is your class year?`), the RA coverage question
(`Do you have an RA assigned to your floor or wing?` with `Yes`/`No`
choices) and the two open-ended text questions. The full column list is in
the [manual](../manual/index.html#the-survey-catalog).

**Collecting responses** Share the form with your residents. When the
administration window closes, open the `Responses` tab and use
`Open in Excel`, or download the responses as a CSV file. Name the file
after the administration year, for example `reslife_2026.csv`: the year in
the file name becomes the dataset label and orders it in year-over-year
views.

**Scoring it** Run `respulse` on the download:

```bash
respulse -i reslife_2026.csv --out summary.json
```

You should see the ingestion and scoring unfold:

```text
[2026-02-12T18:04:33Z INFO  respulse::dashboard] Loaded dataset '2026' (uploaded): 214 rows
[2026-02-12T18:04:33Z INFO  respulse::dashboard] Hall filter: all, trend index: satisfaction
[2026-02-12T18:04:33Z INFO  respulse::dashboard] Summary written to summary.json
```

The summary file now contains every panel of the dashboard in chart-ready
form. For example, the composite scores:

```text
"indexRadar": [
  { "index": "Belonging & Community", "key": "belonging", "score": 4.12 },
  { "index": "Safety & Security", "key": "safety", "score": 4.31 },
  ...
]
```

**Comparing years** Pass several files to compare administrations. The
grouped comparison and the trend line only appear once two or more datasets
are loaded:

```bash
respulse -i reslife_2025.csv -i reslife_2026.csv --trend-index belonging \
    --out summary.json
```

**Trying it without data** The binary ships with a small built-in demo
administration. Run `respulse --demo` to see the full output shape without
any file, or combine `--demo` with `-i` to compare your upload against the
demo baseline.

From here:
- to narrow every panel to one building, pass `--hall "Pine Hall"`. The
  special value `all` goes back to campus-wide.
- to run the same set of files repeatedly, move the flags into a JSON file
  and pass `--config`. See the [configuration
  section](../manual/index.html#configuration).
- if your input is an Excel workbook, pass `--input-type xlsx` (and
  `--excel-worksheet-name` when the workbook has several sheets).

*/
