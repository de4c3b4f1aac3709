//! Client-side batch splitting.
//!
//! Migration scripts may contain a `GO` directive on its own line, marking
//! a boundary between statements that cannot be sent to the engine in one
//! request. The directive is not SQL and must be stripped before execution,
//! so scripts are split here and each batch is executed as its own command.

/// Split `sql` into batches on lines consisting solely of `GO` (any case,
/// surrounding whitespace allowed). Batches that are empty after trimming
/// are dropped.
pub fn split_batches(sql: &str) -> Vec<String> {
    let mut batches = Vec::new();
    let mut current = String::new();
    for line in sql.lines() {
        if line.trim().eq_ignore_ascii_case("GO") {
            push_batch(&mut batches, &mut current);
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    push_batch(&mut batches, &mut current);
    batches
}

fn push_batch(batches: &mut Vec<String>, current: &mut String) {
    if !current.trim().is_empty() {
        batches.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_batch_passes_through() {
        let batches = split_batches("create table t (id int)");
        assert_eq!(batches.len(), 1);
        assert!(batches[0].contains("create table t"));
    }

    #[test]
    fn splits_on_go_lines() {
        let sql = "create table a (id int)\nGO\ncreate table b (id int)";
        let batches = split_batches(sql);
        assert_eq!(batches.len(), 2);
        assert!(batches[0].contains("table a"));
        assert!(batches[1].contains("table b"));
    }

    #[test]
    fn go_is_case_insensitive_and_whitespace_tolerant() {
        let sql = "select 1\n  go  \nselect 2\nGo\nselect 3";
        assert_eq!(split_batches(sql).len(), 3);
    }

    #[test]
    fn go_inside_a_line_does_not_split() {
        let sql = "select 'GO' as token from categories";
        assert_eq!(split_batches(sql).len(), 1);
    }

    #[test]
    fn empty_batches_are_dropped() {
        let sql = "GO\n\nGO\nselect 1\nGO\nGO";
        let batches = split_batches(sql);
        assert_eq!(batches.len(), 1);
        assert!(batches[0].contains("select 1"));
    }

    #[test]
    fn empty_script_yields_no_batches() {
        assert!(split_batches("").is_empty());
        assert!(split_batches("\n  \n").is_empty());
    }
}
