use crate::context::CliContext;
use crate::output;
use crate::render;

pub fn handle_show(ctx: &CliContext, plain: bool) -> anyhow::Result<()> {
    let state = ctx.session.state();
    if plain {
        print!("{}", render::render_board(state));
        Ok(())
    } else {
        output::output_list(state.columns_view())
    }
}

pub fn handle_search(ctx: &CliContext, query: &str) -> anyhow::Result<()> {
    output::output_list(ctx.session.state().search(query))
}
