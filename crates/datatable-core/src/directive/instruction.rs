use crate::model::Logic;

///
/// Instruction
///
/// Tagged directive instruction. Every filter spelling maps onto the same
/// `Filter` tag and differs only in its logic.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Instruction {
    Select,
    Headers,
    Sort,
    Filter(Logic),
}

const ALIASES: &[(&str, Instruction)] = &[
    ("select", Instruction::Select),
    ("cols", Instruction::Select),
    ("title", Instruction::Headers),
    ("titles", Instruction::Headers),
    ("head", Instruction::Headers),
    ("header", Instruction::Headers),
    ("headers", Instruction::Headers),
    ("order", Instruction::Sort),
    ("sort", Instruction::Sort),
    ("where", Instruction::Filter(Logic::And)),
    ("filter", Instruction::Filter(Logic::And)),
    ("filterand", Instruction::Filter(Logic::And)),
    ("and", Instruction::Filter(Logic::And)),
    ("filteror", Instruction::Filter(Logic::Or)),
    ("or", Instruction::Filter(Logic::Or)),
];

impl Instruction {
    /// Look up an instruction by any of its spellings (case-insensitive).
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
            .map(|(_, instruction)| *instruction)
    }

    /// All accepted spellings of this instruction.
    pub fn aliases(self) -> impl Iterator<Item = &'static str> {
        ALIASES
            .iter()
            .filter(move |(_, instruction)| *instruction == self)
            .map(|(alias, _)| *alias)
    }
}
