//! Nexus tree file reader.
//!
//! The text is read as a sequence of `BEGIN <name>; ... END;` blocks, each a
//! sequence of `;`-terminated commands that start with a keyword.
//! [NexusParser] interprets the commands of the `TAXA` and `TREES` blocks it
//! needs and skips everything else command by command.

use crate::model::{LabelResolver, PhylogeneticTree};
use crate::newick::NewickParser;
use crate::nexus::defs::*;
use crate::parser::byte_parser::ByteParser;
use crate::parser::parsing_error::{ParsingError, ParsingErrorType};
use std::collections::HashMap;

// =#========================================================================#=
// NEXUS PARSER
// =#========================================================================$=
/// Reader for the trees of a Nexus file.
///
/// * The text starts with `#NEXUS` (after blanks and comments)
/// * Blocks other than `TAXA` and `TREES` are skipped, as are commands the
///   reader does not know
/// * `TAXA`: `DIMENSIONS NTAX=<n>;` and `TAXLABELS <label>...;` are read;
///   `NTAX` must match the number of labels
/// * `TREES`: an optional `TRANSLATE <key> <label>, ...;` before the first
///   `TREE [*] <name> = <Newick string>` command
///
/// Only the first `TREES` block is read.
///
/// # Example
/// ```
/// use rtt_reconcile::nexus::NexusParser;
/// use rtt_reconcile::parser::ByteParser;
///
/// let input = "#NEXUS
/// Begin Trees;
///   Translate 1 Kea, 2 Kaka, 3 Kakapo;
///   Tree tree1 = ((1:1,2:1):0.5,3:1.5);
/// End;";
/// let trees = NexusParser::new(ByteParser::for_str(input)).parse_all().unwrap();
/// assert_eq!(trees.len(), 1);
/// assert_eq!(trees[0].tip_names(), vec!["Kea", "Kaka", "Kakapo"]);
/// ```
pub struct NexusParser<'a> {
    parser: ByteParser<'a>,
    taxa: Vec<String>,
}

impl<'a> NexusParser<'a> {
    pub fn new(parser: ByteParser<'a>) -> Self {
        Self {
            parser,
            taxa: Vec::new(),
        }
    }

    /// Reads the file up to its first `TREES` block and returns that block's
    /// trees, with tip labels resolved.
    ///
    /// # Errors
    /// A [ParsingError] if the header is missing, a block is malformed or
    /// unterminated, a tree is invalid, or there is no `TREES` block.
    pub fn parse_all(mut self) -> Result<Vec<PhylogeneticTree>, ParsingError> {
        self.parser.skip_comment_and_whitespace()?;
        if !self.parser.consume_if_word(NEXUS_HEADER) {
            return Err(self.parser.error(ParsingErrorType::MissingNexusHeader));
        }

        loop {
            self.parser.skip_comment_and_whitespace()?;
            if self.parser.is_eof() {
                return Err(self.parser.error(ParsingErrorType::InvalidTreesBlock(
                    "no TREES block found".to_string(),
                )));
            }

            match self.begin_block()? {
                NexusBlock::Taxa => self.read_taxa_block()?,
                NexusBlock::Trees => return self.read_trees_block(),
                NexusBlock::Other(name) => {
                    log::debug!("Skipping Nexus block {}", name);
                    self.skip_block()?;
                }
            }
        }
    }
}

// ============================================================================
// Commands
// ============================================================================
impl NexusParser<'_> {
    /// Reads the keyword of the next command, lowercased; empty if there is none.
    fn next_keyword(&mut self) -> Result<String, ParsingError> {
        Ok(self.parser.parse_label(WORD_DELIMITERS)?.to_ascii_lowercase())
    }

    /// Consumes the `;` that must end the current command.
    fn end_command(&mut self, command: &str) -> Result<(), ParsingError> {
        self.parser.skip_comment_and_whitespace()?;
        if self.parser.consume_if(b';') {
            return Ok(());
        }
        let found = self.parser.describe_next();
        Err(self
            .parser
            .error(ParsingErrorType::InvalidBlock(format!("expected ';' after {command} but found {found}"))))
    }

    /// Skips the rest of the current command including its `;`, stepping
    /// over quoted labels and comments that might contain one.
    fn skip_command(&mut self) -> Result<(), ParsingError> {
        loop {
            self.parser.skip_comment_and_whitespace()?;
            match self.parser.peek() {
                None => return Err(self.parser.error(ParsingErrorType::UnexpectedEOF)),
                Some(b';') => {
                    self.parser.next_byte();
                    return Ok(());
                }
                Some(b'\'') => {
                    self.parser.parse_label(b"")?;
                }
                Some(_) => {
                    self.parser.next_byte();
                }
            }
        }
    }

    /// Handles a command that is not interpreted by the current block.
    ///
    /// Returns `true` once the block's `END;` has been consumed.
    fn handle_other(&mut self, keyword: &str, block: &str) -> Result<bool, ParsingError> {
        match keyword {
            "end" | "endblock" => {
                self.end_command(keyword)?;
                Ok(true)
            }
            "" if self.parser.is_eof() => Err(self.parser.error(ParsingErrorType::UnexpectedEOF)),
            _ => {
                log::debug!("Skipping '{}' command in {} block", keyword, block);
                self.skip_command()?;
                Ok(false)
            }
        }
    }

    /// Reads `BEGIN <name>;` and classifies the block.
    fn begin_block(&mut self) -> Result<NexusBlock, ParsingError> {
        let keyword = self.next_keyword()?;
        if keyword != "begin" {
            return Err(self.parser.error(ParsingErrorType::InvalidBlock(format!(
                "expected BEGIN but found '{keyword}'"
            ))));
        }

        let name = self.parser.parse_label(WORD_DELIMITERS)?;
        self.end_command("block name")?;
        Ok(NexusBlock::from_name(&name))
    }

    fn skip_block(&mut self) -> Result<(), ParsingError> {
        loop {
            let keyword = self.next_keyword()?;
            if self.handle_other(&keyword, "skipped")? {
                return Ok(());
            }
        }
    }
}

// ============================================================================
// TAXA block
// ============================================================================
impl NexusParser<'_> {
    fn read_taxa_block(&mut self) -> Result<(), ParsingError> {
        let mut ntax = None;
        loop {
            let keyword = self.next_keyword()?;
            match keyword.as_str() {
                "dimensions" => ntax = self.read_dimensions()?.or(ntax),
                "taxlabels" => self.read_taxlabels()?,
                _ => {
                    if self.handle_other(&keyword, "TAXA")? {
                        break;
                    }
                }
            }
        }

        if let Some(ntax) = ntax {
            if ntax != self.taxa.len() {
                return Err(self.parser.error(ParsingErrorType::InvalidTaxaBlock(format!(
                    "NTAX={} but {} labels listed",
                    ntax,
                    self.taxa.len()
                ))));
            }
        }

        log::debug!("Nexus TAXA block lists {} taxa", self.taxa.len());
        Ok(())
    }

    /// Reads the `key=value` pairs of `DIMENSIONS` and returns `NTAX`, if given.
    fn read_dimensions(&mut self) -> Result<Option<usize>, ParsingError> {
        let mut ntax = None;
        loop {
            self.parser.skip_comment_and_whitespace()?;
            if self.parser.consume_if(b';') {
                return Ok(ntax);
            }

            let key = self.parser.parse_label(WORD_DELIMITERS)?;
            self.parser.skip_comment_and_whitespace()?;
            if key.is_empty() || !self.parser.consume_if(b'=') {
                return Err(self.parser.error(ParsingErrorType::InvalidTaxaBlock(
                    "expected <key>=<value> in DIMENSIONS".to_string(),
                )));
            }

            let value = self.parser.parse_label(WORD_DELIMITERS)?;
            if key.eq_ignore_ascii_case("ntax") {
                let parsed = value.parse::<usize>().map_err(|_| {
                    self.parser.error(ParsingErrorType::InvalidTaxaBlock(format!(
                        "NTAX value '{value}' is not a count"
                    )))
                })?;
                ntax = Some(parsed);
            }
        }
    }

    fn read_taxlabels(&mut self) -> Result<(), ParsingError> {
        loop {
            let label = self.parser.parse_label(LABEL_DELIMITERS)?;
            if !label.is_empty() {
                self.taxa.push(label);
                continue;
            }

            match self.parser.next_byte() {
                Some(b';') => return Ok(()),
                Some(_) => {} // stray comma
                None => return Err(self.parser.error(ParsingErrorType::UnexpectedEOF)),
            }
        }
    }
}

// ============================================================================
// TREES block
// ============================================================================
impl NexusParser<'_> {
    fn read_trees_block(&mut self) -> Result<Vec<PhylogeneticTree>, ParsingError> {
        let mut translation = None;
        let mut newick_parser: Option<NewickParser> = None;
        let mut trees = Vec::new();

        loop {
            let keyword = self.next_keyword()?;
            match keyword.as_str() {
                "translate" if newick_parser.is_none() && translation.is_none() => {
                    translation = Some(self.read_translate()?);
                }
                "translate" => {
                    return Err(self.parser.error(ParsingErrorType::InvalidTranslateCommand(
                        "only one TRANSLATE, before the first TREE, is allowed".to_string(),
                    )));
                }
                "tree" => {
                    let name = self.read_tree_name()?;
                    let newick = newick_parser.get_or_insert_with(|| {
                        let resolver = LabelResolver::for_nexus(translation.take(), std::mem::take(&mut self.taxa));
                        NewickParser::new().with_resolver(resolver)
                    });
                    trees.push(newick.parse_named(&mut self.parser, Some(name))?);
                }
                _ => {
                    if self.handle_other(&keyword, "TREES")? {
                        break;
                    }
                }
            }
        }

        log::debug!("Nexus TREES block holds {} trees", trees.len());
        Ok(trees)
    }

    /// Reads `[*] <name> =` after the `TREE` keyword.
    fn read_tree_name(&mut self) -> Result<String, ParsingError> {
        self.parser.skip_comment_and_whitespace()?;
        self.parser.consume_if(b'*');

        let name = self.parser.parse_label(TREE_NAME_DELIMITERS)?;
        self.parser.skip_comment_and_whitespace()?;
        if !self.parser.consume_if(b'=') {
            let found = self.parser.describe_next();
            return Err(self.parser.error(ParsingErrorType::InvalidTreesBlock(format!(
                "expected '=' after tree name but found {found}"
            ))));
        }

        Ok(name)
    }

    /// Reads the `<key> <label>` pairs of `TRANSLATE`; a trailing comma is tolerated.
    fn read_translate(&mut self) -> Result<HashMap<String, String>, ParsingError> {
        let mut translation = HashMap::with_capacity(self.taxa.len());
        loop {
            self.parser.skip_comment_and_whitespace()?;
            if self.parser.consume_if(b';') {
                break;
            }

            let key = self.parser.parse_label(LABEL_DELIMITERS)?;
            let label = self.parser.parse_label(LABEL_DELIMITERS)?;
            if key.is_empty() || label.is_empty() {
                let found = self.parser.describe_next();
                return Err(self.parser.error(ParsingErrorType::InvalidTranslateCommand(format!(
                    "expected '<key> <label>' but found {found}"
                ))));
            }
            if translation.contains_key(&key) {
                return Err(self.parser.error(ParsingErrorType::InvalidTranslateCommand(format!(
                    "key '{key}' is translated twice"
                ))));
            }
            translation.insert(key, label);

            self.parser.skip_comment_and_whitespace()?;
            if !self.parser.consume_if(b',') && !self.parser.peek_is(b';') {
                let found = self.parser.describe_next();
                return Err(self.parser.error(ParsingErrorType::InvalidTranslateCommand(format!(
                    "expected ',' or ';' but found {found}"
                ))));
            }
        }

        log::debug!("Nexus TRANSLATE command maps {} keys", translation.len());
        Ok(translation)
    }
}
