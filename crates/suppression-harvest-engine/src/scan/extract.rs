use crate::suppression::Candidate;

use super::locator::LocatedBlock;

/// Copies a located block out of the log.
///
/// The opening and closing lines are kept as-is; the rule is every line
/// strictly between the marker and the closing delimiter. The marker line is
/// dropped because a label takes its place.
pub fn extract(lines: &[String], block: &LocatedBlock) -> Candidate {
    Candidate {
        opening: lines[block.opening()].clone(),
        rule: lines[block.marker() + 1..block.closing()].to_vec(),
        closing: lines[block.closing()].clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{BlockLocator, ScanEvent};
    use crate::tests::lines;
    use pretty_assertions::assert_eq;

    fn first_candidate(lines: &[String]) -> Candidate {
        let block = BlockLocator::new(lines)
            .find_map(|event| match event {
                ScanEvent::Located(block) => Some(block),
                _ => None,
            })
            .unwrap();
        extract(lines, &block)
    }

    #[test]
    fn drops_marker_and_splits_closing() {
        let log = lines(
            "junk\n{\n   <insert a suppression name here>\n   Memcheck:Cond\n   fun:strlen\n   obj:/lib/libc.so\n}\ntrailer\n",
        );

        let candidate = first_candidate(&log);

        assert_eq!(candidate.opening, "{\n");
        assert_eq!(
            candidate.rule,
            vec!["   Memcheck:Cond\n", "   fun:strlen\n", "   obj:/lib/libc.so\n"]
        );
        assert_eq!(candidate.closing, "}\n");
    }

    #[test]
    fn empty_rule_between_marker_and_close() {
        let log = lines("{\n<insert a suppression name here>\n}");

        let candidate = first_candidate(&log);

        assert!(candidate.rule.is_empty());
        assert_eq!(candidate.closing, "}");
    }

    #[test]
    fn whitespace_is_preserved_exactly() {
        let log = lines("{ \n\t<insert a suppression name here>\n\t fun:f  \r\n }\n");

        let candidate = first_candidate(&log);

        assert_eq!(candidate.opening, "{ \n");
        assert_eq!(candidate.rule, vec!["\t fun:f  \r\n"]);
        assert_eq!(candidate.closing, " }\n");
    }
}
