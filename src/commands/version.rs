//! `ado version`

use anyhow::Result;

use crate::commands::CommandContext;
use crate::parser::{ParsedArgs, Parser};

pub fn schema(_ctx: &CommandContext) -> Parser {
    // No arguments; anything passed falls out as an extra token.
    Parser::new()
}

pub fn run(_ctx: &mut CommandContext, _args: &ParsedArgs) -> Result<()> {
    println!("ado {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_context;
    use crate::parser::tokens;

    #[test]
    fn version_takes_no_arguments() {
        let ctx = test_context();
        assert!(schema(&ctx).parse(&[]).is_ok());
        assert!(schema(&ctx).parse(&tokens("please")).is_err());
    }
}
