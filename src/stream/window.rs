//! Stable/volatile partition of a rendered document.

/// How one render splits into committed, newly stable and live lines.
///
/// The live region is always `stable..`, even when fewer lines are stable
/// than were already printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    /// Lines considered stable after this render; the live region starts here.
    pub stable: usize,
    /// Range of lines to commit now (`printed..stable`), if any.
    pub commit: Option<(usize, usize)>,
}

/// Partition `rendered` lines given `printed` already committed.
///
/// While streaming, the last `live_window` lines stay live. On the final
/// render everything is stable. Nothing is committed when the stable prefix
/// does not extend past what was already printed.
pub const fn split(rendered: usize, printed: usize, live_window: usize, is_final: bool) -> Split {
    let stable = if is_final {
        rendered
    } else {
        rendered.saturating_sub(live_window)
    };

    let commit = if stable > printed {
        Some((printed, stable))
    } else {
        None
    };

    Split { stable, commit }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_render_stays_live() {
        let s = split(3, 0, 6, false);
        assert_eq!(s, Split { stable: 0, commit: None });
    }

    #[test]
    fn test_commits_beyond_window() {
        let s = split(10, 0, 6, false);
        assert_eq!(s.commit, Some((0, 4)));
        assert_eq!(s.stable, 4);
    }

    #[test]
    fn test_commits_only_new_lines() {
        let s = split(12, 4, 6, false);
        assert_eq!(s.commit, Some((4, 6)));
    }

    #[test]
    fn test_shrinkage_commits_nothing() {
        let s = split(9, 5, 6, false);
        assert_eq!(s, Split { stable: 3, commit: None });
    }

    #[test]
    fn test_final_commits_everything() {
        let s = split(10, 4, 6, true);
        assert_eq!(s.commit, Some((4, 10)));
        assert_eq!(s.stable, 10);
    }

    #[test]
    fn test_zero_window_commits_all_while_streaming() {
        let s = split(5, 2, 0, false);
        assert_eq!(s.commit, Some((2, 5)));
    }
}
