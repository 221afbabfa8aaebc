use serde::Serialize;

use crate::catalogue::ToolRecord;

/// Minimum rating counted as popular
pub const POPULAR_RATING: f64 = 4.5;

/// Header counters, always computed over the whole catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub popular: usize,
    pub recent: usize,
}

pub fn summarize(tools: &[ToolRecord]) -> Stats {
    Stats {
        total: tools.len(),
        popular: tools.iter().filter(|t| t.rating >= POPULAR_RATING).count(),
        recent: tools.iter().filter(|t| t.is_recent()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::fixtures::{sample_tools, tool};

    #[test]
    fn test_summarize_sample() {
        let stats = summarize(&sample_tools());
        assert_eq!(
            stats,
            Stats {
                total: 10,
                popular: 6,
                recent: 6
            }
        );
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(
            summarize(&[]),
            Stats {
                total: 0,
                popular: 0,
                recent: 0
            }
        );
    }

    #[test]
    fn test_summarize_popular_threshold_is_inclusive() {
        let tools = vec![
            tool(1, "a", "x", 4.5, "1 year ago"),
            tool(2, "b", "x", 4.49, "1 year ago"),
        ];
        assert_eq!(summarize(&tools).popular, 1);
    }
}
