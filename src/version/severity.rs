//! Aggregation of independent verdicts into one severity

use crate::version::compat::Verdict;

/// Combine verdicts into the most severe one.
///
/// `Error` dominates `Warning`, which dominates everything else. `Unknown`
/// never raises the severity, so all-unknown or empty input is `Compatible`.
pub fn aggregate<I>(verdicts: I) -> Verdict
where
    I: IntoIterator<Item = Verdict>,
{
    verdicts
        .into_iter()
        .fold(Verdict::Compatible, |worst, verdict| {
            if rank(verdict) > rank(worst) {
                verdict
            } else {
                worst
            }
        })
}

fn rank(verdict: Verdict) -> u8 {
    match verdict {
        Verdict::Error => 2,
        Verdict::Warning => 1,
        Verdict::Compatible | Verdict::Unknown => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[Verdict::Unknown, Verdict::Unknown], Verdict::Compatible)]
    #[case(&[Verdict::Warning, Verdict::Unknown], Verdict::Warning)]
    #[case(&[Verdict::Unknown, Verdict::Warning], Verdict::Warning)]
    #[case(&[Verdict::Error, Verdict::Warning], Verdict::Error)]
    #[case(&[Verdict::Warning, Verdict::Error], Verdict::Error)]
    #[case(&[Verdict::Compatible, Verdict::Compatible], Verdict::Compatible)]
    #[case(&[Verdict::Compatible, Verdict::Unknown], Verdict::Compatible)]
    #[case(&[Verdict::Error, Verdict::Unknown], Verdict::Error)]
    #[case(&[], Verdict::Compatible)]
    fn aggregate_returns_most_severe(#[case] verdicts: &[Verdict], #[case] expected: Verdict) {
        assert_eq!(aggregate(verdicts.iter().copied()), expected);
    }
}
