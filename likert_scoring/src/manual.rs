/*!

This is the long-form manual for `likert_scoring` and `respulse`.

## Input formats

The following formats are supported:
* `csv` Comma Separated Values, as downloaded from Microsoft Forms, Google
  Forms or Qualtrics. This is the default.
* `xlsx` Excel spreadsheets, as exported by Microsoft Forms with the
  "Open in Excel" option.

Both formats are read the same way: the first row is the header, every
following row is one survey response. Columns are matched to the survey
catalog by their full header text, exactly as written (after trimming the
cell). Unknown columns are carried along untouched and simply never
aggregate; known columns that are missing behave as if every response left
them blank.

Fully empty lines are skipped. A row that is shorter than the header is
padded with empty cells rather than rejected, and a malformed line is logged
as a warning and skipped without aborting the file.

### Likert answers

Answer cells for index questions are coerced with one rule: an integer
between 1 and 5, written as text (`"4"`, with surrounding whitespace
tolerated) or as a number (Excel often stores `4` as a float), is a score.
Everything else, including `0`, `6`, decimal values and prose such as
`Agree`, counts as "did not answer". If your survey platform exports labeled
choices, re-export it with numeric values.

## The survey catalog

The six indices, their keys and their question columns are fixed at compile
time:

| key            | label                    | questions |
|----------------|--------------------------|-----------|
| `belonging`    | Belonging & Community    | 3         |
| `safety`       | Safety & Security        | 3         |
| `facilities`   | Facilities & Maintenance | 3         |
| `ra_support`   | RA Support               | 3         |
| `programming`  | Programming & Events     | 3         |
| `satisfaction` | Overall Satisfaction     | 3         |

An index score is the unweighted mean of its per-question means, taken over
the questions that drew at least one response. `ra_support` only counts rows
whose `Do you have an RA assigned to your floor or wing?` answer is `Yes`;
the other residents are not asked to rate an RA they do not have.

The demographic columns are `Which residence hall do you live in?` and
`What is your class year?`. The two open-ended columns at the end of the
survey feed the "resident voices" sample: up to 5 distinct answers each, in
response order.

## Datasets, labels and years

Every ingested file becomes one dataset. Its label is the first standalone
`20xx` year found in the file name (`reslife_2026.csv` becomes `2026`), or
the file stem when no year is present. Labels drive the trend ordering:
datasets with a detectable year are plotted in year order, datasets without
one come first, in the order they were added. Uploading the
same file twice is allowed and keeps both copies; the identifiers stay
distinct because they include a fingerprint of the file content.

Comparison views (the grouped matrix and the trend line) need at least two
datasets. With fewer, they are empty and the consumer is expected to show a
placeholder.

## Filtering by hall

The hall filter keeps the rows whose hall answer equals the requested value,
both sides trimmed. The value `all` (in any casing) disables the filter. A
hall with no rows is a valid selection that produces "no data" everywhere,
not an error.

## Configuration

`respulse` accepts all its settings on the command line for one-off runs and
a JSON configuration file (`--config`) for repeated ones. Command-line flags
win over the file. The file looks as follows:

```text
{
  "outputSettings": {
    "surveyTitle": "Residence Life Survey",
    "outputPath": "summary.json"
  },
  "sourceFiles": [
    { "provider": "csv", "filePath": "exports/reslife_2025.csv" },
    { "provider": "xlsx", "filePath": "exports/reslife_2026.xlsx",
      "label": 2026, "excelWorksheetName": "Sheet1" }
  ],
  "hallFilter": "all",
  "trendIndex": "satisfaction",
  "includeDemoData": false
}
```

Notes:
- `label` (string or number, optional): overrides the label derived from the
  file name. Numbers are accepted because hand-written configurations tend to
  write years unquoted.
- `excelWorksheetName` (string, optional): for Excel inputs, the name of the
  worksheet. Without it the file must contain a single worksheet.
- `includeDemoData` (boolean, optional): adds the built-in demo dataset in
  front of the configured sources, like the `--demo` flag.

## Output

The summary is a single JSON document with one top-level key per dashboard
panel: `config`, `datasets`, `kpis`, `indexRadar`, `questionBars`,
`comparison`, `trend`, `demographics` and `voices`. Radar and bar payloads
use `0.0` for "no data": a genuine Likert mean is always within `[1, 5]`.
`comparison` and `trend` are `null` until a second dataset is added.

The `--reference` flag re-reads a previously generated summary and fails the
run if the current output differs, printing the differences. This is meant
for keeping archived summaries honest after an upgrade.

*/
