//! Newick tree reader.
//!
//! [NewickParser] reads a tree with an explicit stack of open clades instead
//! of recursion, so ladder-like trees with thousands of nested parentheses
//! are read in constant stack space.

use crate::model::{BranchLength, LabelResolver, PhylogeneticTree, TreeBuilder, VertexIndex};
use crate::parser::byte_parser::ByteParser;
use crate::parser::parsing_error::{ParsingError, ParsingErrorType};

/// Bytes ending an unquoted Newick label
const LABEL_DELIMITERS: &[u8] = b"(),:;[ \t\n\r";

/// Leaf count assumed for the first tree when nothing better is known
const DEFAULT_NUM_LEAVES_GUESS: usize = 16;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Reader for rooted Newick trees.
///
/// Accepts any number of children per vertex, quoted and unquoted labels,
/// internal labels, optional branch lengths (including scientific notation)
/// and `[...]` comments wherever whitespace may appear. Tip labels go
/// through a [LabelResolver]: verbatim for plain Newick, configured from
/// `TRANSLATE`/`TAXA` for trees inside Nexus files.
///
/// Rejects unbalanced parentheses, a missing `;`, empty or duplicate tip
/// names, negative or non-numeric branch lengths, and a bare leaf as the
/// whole tree.
///
/// # Example
/// ```
/// use rtt_reconcile::newick::NewickParser;
/// use rtt_reconcile::parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("((A_meleagrides:1.0,A_vulturinum:1.0):0.5,G_plumifera:1.5);");
/// let tree = NewickParser::new().parse_next(&mut byte_parser).unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// ```
#[derive(Debug)]
pub struct NewickParser {
    builder: TreeBuilder,
    resolver: LabelResolver,
    num_leaves_guess: usize,
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

impl NewickParser {
    /// Creates a parser taking tip labels verbatim.
    pub fn new() -> Self {
        Self {
            builder: TreeBuilder::new(),
            resolver: LabelResolver::Verbatim,
            num_leaves_guess: DEFAULT_NUM_LEAVES_GUESS,
        }
    }

    /// Uses `resolver` to turn raw tip labels into tip names.
    pub fn with_resolver(mut self, resolver: LabelResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Parses trees until the input is exhausted.
    ///
    /// # Errors
    /// Returns the first [ParsingError]; trees read before it are dropped.
    pub fn parse_all(&mut self, mut parser: ByteParser<'_>) -> Result<Vec<PhylogeneticTree>, ParsingError> {
        let mut trees = Vec::new();
        loop {
            parser.skip_comment_and_whitespace()?;
            if parser.is_eof() {
                return Ok(trees);
            }
            trees.push(self.parse_next(&mut parser)?);
        }
    }

    /// Parses the next tree, up to and including its `;`.
    pub fn parse_next(&mut self, parser: &mut ByteParser<'_>) -> Result<PhylogeneticTree, ParsingError> {
        self.parse_named(parser, None)
    }

    /// Parses the next tree and gives it `name`, e.g. from a Nexus `TREE` command.
    pub(crate) fn parse_named(
        &mut self,
        parser: &mut ByteParser<'_>,
        name: Option<String>,
    ) -> Result<PhylogeneticTree, ParsingError> {
        self.builder.init_next(self.num_leaves_guess);
        if let Some(name) = name {
            self.builder.set_name(name);
        }

        self.parse_clades(parser)?;

        let tree = self.builder.finish_tree();
        self.num_leaves_guess = tree.num_leaves();
        Ok(tree)
    }
}

impl NewickParser {
    /// Reads `(...)[name][:length];` and adds all its vertices, root last.
    fn parse_clades(&mut self, parser: &mut ByteParser<'_>) -> Result<(), ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b'(') {
            let found = parser.describe_next();
            return Err(invalid(parser, format!("expected '(' at start of tree but found {found}")));
        }

        // Children collected so far for every clade whose ')' is still ahead
        let mut open: Vec<Vec<VertexIndex>> = vec![Vec::new()];
        let mut expect_child = true;

        loop {
            parser.skip_comment_and_whitespace()?;

            if expect_child {
                if parser.consume_if(b'(') {
                    open.push(Vec::new());
                    continue;
                }
                let leaf = self.parse_leaf(parser)?;
                if let Some(siblings) = open.last_mut() {
                    siblings.push(leaf);
                }
                expect_child = false;
            } else if parser.consume_if(b',') {
                expect_child = true;
            } else if parser.consume_if(b')') {
                let children = open.pop().unwrap_or_default();
                let name = self.parse_internal_name(parser)?;
                let branch_length = self.parse_branch_length(parser)?;

                match open.last_mut() {
                    Some(siblings) => {
                        siblings.push(self.builder.add_internal(children, branch_length, name));
                    }
                    None => {
                        parser.skip_comment_and_whitespace()?;
                        if !parser.consume_if(b';') {
                            let found = parser.describe_next();
                            return Err(invalid(parser, format!("expected ';' after root but found {found}")));
                        }
                        self.builder.add_root(children, branch_length, name);
                        return Ok(());
                    }
                }
            } else if parser.is_eof() {
                return Err(invalid(parser, format!("{} unclosed '('", open.len())));
            } else {
                let found = parser.describe_next();
                return Err(invalid(parser, format!("expected ',' or ')' but found {found}")));
            }
        }
    }

    /// Reads `label[:length]`, resolves the label and adds the leaf.
    fn parse_leaf(&mut self, parser: &mut ByteParser<'_>) -> Result<VertexIndex, ParsingError> {
        let raw = parser.parse_label(LABEL_DELIMITERS)?;
        if raw.is_empty() {
            let found = parser.describe_next();
            return Err(invalid(parser, format!("expected tip label but found {found}")));
        }

        let label = self
            .resolver
            .resolve_label(&raw)
            .map_err(|msg| parser.error(ParsingErrorType::UnresolvedLabel(msg)))?;
        if !self.builder.is_new_label(&label) {
            return Err(parser.error(ParsingErrorType::InvalidTreeStructure(format!(
                "tip name '{label}' occurs twice"
            ))));
        }

        let branch_length = self.parse_branch_length(parser)?;
        Ok(self.builder.add_leaf(branch_length, label))
    }

    fn parse_internal_name(&mut self, parser: &mut ByteParser<'_>) -> Result<Option<String>, ParsingError> {
        let name = parser.parse_label(LABEL_DELIMITERS)?;
        Ok(Some(name).filter(|n| !n.is_empty()))
    }

    /// Reads an optional `:length`; the number may use scientific notation.
    fn parse_branch_length(&mut self, parser: &mut ByteParser<'_>) -> Result<Option<BranchLength>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let start = parser.position();
        let number = parser.take_while(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'));
        let length = number
            .parse::<f64>()
            .ok()
            .and_then(BranchLength::try_new)
            .ok_or_else(|| {
                ParsingError::new(
                    ParsingErrorType::InvalidNewickString(format!(
                        "branch length '{number}' is not a non-negative number"
                    )),
                    start,
                    number.to_string(),
                )
            })?;

        Ok(Some(length))
    }
}

fn invalid(parser: &ByteParser<'_>, msg: String) -> ParsingError {
    parser.error(ParsingErrorType::InvalidNewickString(msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_nesting_without_recursion() {
        let depth = 50_000;
        let mut newick = "(".repeat(depth);
        newick.push_str("t0:1");
        for i in 1..depth {
            newick.push_str(&format!(",t{i}:1):1"));
        }
        newick.push_str(",last:1);");

        let tree = NewickParser::new().parse_next(&mut ByteParser::for_str(&newick)).unwrap();
        assert_eq!(tree.num_leaves(), depth + 1);
        assert!(tree.is_valid());
    }

    #[test]
    fn test_error_positions() {
        let err = NewickParser::new()
            .parse_next(&mut ByteParser::for_str("((A:1,B:-2),C);"))
            .unwrap_err();
        assert_eq!(err.position(), 8);
        assert_eq!(err.context(), "-2");

        let err = NewickParser::new()
            .parse_next(&mut ByteParser::for_str("((A,B),C"))
            .unwrap_err();
        assert!(err.to_string().contains("1 unclosed '('"));
    }
}
