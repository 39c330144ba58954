/*!

This is the long-form manual for `portal_votes` and the `portal-votes` command.

## Running a vote

A vote is a single multiple choice question asked to all eligible voters.
Each voter receives a personal token from the portal. The vote itself is
collected with a Google Form that has exactly two questions:

1. a required short answer: `What is your voting token?`. The portal fills it
   in through a pre-filled link ending in `${token}`.
2. a required multiple choice question: the question being voted on.

When the vote is closed, export the tokens of the vote link from the portal
as `tokens.csv` and the responses of the form (through the linked spreadsheet,
`File > Download > Comma-separated values`) as `results.csv`. Then run:

```bash
portal-votes --tokens tokens.csv --results results.csv
```

## Input formats

### `tokens.csv`

One token per line, without header. Blank lines and surrounding whitespace are
ignored.

### `results.csv`

The export of the form responses. The first line is the header and is ignored.
Every other line must be `time,token,option`. The fields are taken verbatim:
there is no quoting, so options cannot contain commas.

If a line has more or fewer than three fields, the form had more than one
question. The whole export is rejected and the vote must be evaluated by hand.

## Output

```text
Error: Invalid voting token 7f3c

Results:
Option No: 1 33.33333333333333%
Option Yes: 2 66.66666666666666%

3 Vote(s) / 0 Abstain(s) / 3 Total
```

- one `Error:` line per response with a token that is not in `tokens.csv`.
- the options by increasing number of votes. Options with the same number of
  votes are listed in the order their first counted vote appears.
- the percentage is relative to the number of eligible voters, not to the
  number of votes, and is printed with full precision.
- the last line gives the number of votes, abstentions and eligible voters.

With `--out`, the same figures are written as JSON.

## Known quirks

These behaviours are kept as is so that the output can be compared with past
results:

- a voter who answers several times is counted once, with the last answer.
- a response with an unknown token is reported but still counted. The number
  of abstentions is the number of eligible voters minus the number of distinct
  tokens that voted, and can therefore be negative.
- with an empty `tokens.csv`, the percentages are `Infinity` or `NaN`.
*/
