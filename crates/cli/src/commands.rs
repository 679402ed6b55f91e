use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use generator::{Burnability, ContractParams, ContractVariant, GeneratorError, MintAccess, Model};

#[derive(Parser, Debug)]
#[command(
    name = "hvyc",
    version,
    about = "Generate and compile HVYC ERC-721 character contracts"
)]
pub(crate) struct Cli {
    /// Config file (defaults to .hvyc/config.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Render contract source.
    Render {
        #[command(flatten)]
        contract: ContractArgs,
        /// Write source here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render and compile a contract.
    Compile {
        #[command(flatten)]
        contract: ContractArgs,
        /// Write source, ABI, bytecode and manifest here instead of printing JSON.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Verify that the configured solc reports the configured version.
    CheckSolc,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct ContractArgs {
    /// Contract name (a Solidity identifier).
    #[arg(long)]
    pub name: String,
    /// Mint price in ether for randomized properties.
    #[arg(long)]
    pub price: String,
    /// Mint price in ether for caller-chosen properties.
    #[arg(long)]
    pub premium_price: String,
    #[arg(long)]
    pub max_supply: String,
    /// Numeric property; repeat or comma-separate for several.
    #[arg(long = "property", value_delimiter = ',')]
    pub properties: Vec<String>,
    #[arg(long, value_enum, default_value_t = ModelArg::Character)]
    pub model: ModelArg,
    #[arg(long, value_enum, default_value_t = AccessArg::Payable)]
    pub mint_access: AccessArg,
    /// Override the model's default burnability.
    #[arg(long)]
    pub burnable: Option<bool>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModelArg {
    Character,
    Immortal,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AccessArg {
    Payable,
    OwnerOnly,
}

impl ContractArgs {
    pub fn variant(&self) -> ContractVariant {
        let model = match self.model {
            ModelArg::Character => Model::Character,
            ModelArg::Immortal => Model::Immortal,
        };
        let mint_access = match self.mint_access {
            AccessArg::Payable => MintAccess::Payable,
            AccessArg::OwnerOnly => MintAccess::OwnerOnly,
        };
        let burnability = match self.burnable {
            Some(true) => Burnability::Burnable,
            Some(false) => Burnability::NonBurnable,
            None => model.default_burnability(),
        };
        ContractVariant::new(model, mint_access, burnability)
    }

    pub fn to_params(&self) -> Result<ContractParams, GeneratorError> {
        ContractParams::parse(
            &self.name,
            &self.price,
            &self.premium_price,
            &self.max_supply,
            self.properties.as_slice(),
            self.variant(),
        )
    }
}
