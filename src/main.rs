mod entry;
mod logger;
mod shutdown_handlers;

use polypath::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
