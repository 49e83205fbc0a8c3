use crate::Commands;

mod admin;
mod data;
mod meta;
mod text;
mod translate;

pub struct Cog {
    pub commands: Commands,
    pub category: String,
}

impl Cog {
    pub fn new(commands: Commands, category: String) -> Self {
        Self { commands, category }
    }
}

// A thin cog layer over poise's flat command list: each module
// contributes its commands under one category.
pub fn commands() -> Commands {
    let cogs = [
        admin::cog(),
        data::cog(),
        text::cog(),
        translate::cog(),
        meta::cog(),
    ];

    let mut result = vec![];
    for cog in cogs {
        for command in cog.commands {
            result.push(poise::Command {
                category: Some(cog.category.clone()),
                ..command
            });
        }
    }
    result
}
