use anyhow::Context;
use bootcamp_client::{
    connection::LedgerConnection,
    context::{
        pool::PoolContext,
        token::token_account_amount,
    },
    error::BootcampError,
    logs::log_success,
    print_kv,
    transactions::BootcampClient,
};
use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
};

#[derive(clap::Args, Debug)]
pub struct WithdrawLiquidityArgs {
    /// The AMM program id.
    #[arg(long)]
    pub amm_program: Pubkey,

    /// The AMM config account the pool belongs to.
    #[arg(long)]
    pub amm: Pubkey,

    #[arg(long)]
    pub mint_a: Pubkey,

    #[arg(long)]
    pub mint_b: Pubkey,

    /// Liquidity tokens to burn, in base units.
    #[arg(long)]
    pub amount: u64,

    /// Create the payer's token accounts for A and B first, if they don't exist yet.
    #[arg(long)]
    pub create_atas: bool,
}

impl WithdrawLiquidityArgs {
    pub fn pool(&self) -> PoolContext {
        PoolContext::new(self.amm_program, self.amm, self.mint_a, self.mint_b)
    }
}

pub async fn withdraw_liquidity<C: LedgerConnection>(
    client: &BootcampClient<C>,
    payer: &Keypair,
    args: &WithdrawLiquidityArgs,
) -> anyhow::Result<()> {
    let pool = args.pool();
    let depositor = payer.pubkey();
    print_kv!("Pool", pool.pool());
    print_kv!("Pool authority", pool.pool_authority());
    print_kv!("Liquidity mint", pool.liquidity_mint());

    let mut instructions = match args.create_atas {
        true => pool.create_depositor_token_accounts(&depositor, &depositor).to_vec(),
        false => vec![],
    };
    instructions.push(pool.withdraw_liquidity(&depositor, args.amount)?);

    let signature = client
        .send_single_signer(payer, &instructions)
        .await
        .context("withdrawing liquidity")?;
    log_success("Withdrew liquidity", signature);

    let labels = ["Token A", "Token B", "Liquidity"];
    for (label, address) in labels.into_iter().zip(pool.depositor_accounts(&depositor)) {
        print_kv!(label, token_balance(client, &address).await?);
    }
    Ok(())
}

/// A missing token account holds nothing.
async fn token_balance<C: LedgerConnection>(
    client: &BootcampClient<C>,
    address: &Pubkey,
) -> anyhow::Result<u64> {
    match client.account(address).await {
        Ok(account) => Ok(token_account_amount(address, &account.data)?),
        Err(BootcampError::UninitializedAccount(_)) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use bootcamp_client::{
        config::ClientConfig,
        test_helpers::{
            mock_ledger::MockLedger,
            test_accounts::payer,
        },
        LAMPORTS_PER_SOL,
    };
    use bootcamp_interface::{
        anchor::instruction_discriminator,
        instructions::amm::WITHDRAW_LIQUIDITY,
    };

    use super::*;

    fn args(create_atas: bool) -> WithdrawLiquidityArgs {
        WithdrawLiquidityArgs {
            amm_program: Pubkey::new_unique(),
            amm: Pubkey::new_unique(),
            mint_a: Pubkey::new_unique(),
            mint_b: Pubkey::new_unique(),
            amount: 100_000_000,
            create_atas,
        }
    }

    #[tokio::test]
    async fn withdraw_runs_after_the_optional_token_accounts() -> anyhow::Result<()> {
        let ledger = MockLedger::new();
        ledger.set_balance(&payer().pubkey(), LAMPORTS_PER_SOL);
        let client = BootcampClient::new(ledger, ClientConfig::default());
        let args = args(true);

        withdraw_liquidity(&client, payer(), &args).await?;

        let executed = client.connection.executed_instructions();
        assert_eq!(executed.len(), 3);
        assert_eq!(executed[2].program_id, args.amm_program);
        assert_eq!(
            executed[2].data[..8],
            instruction_discriminator(WITHDRAW_LIQUIDITY)
        );
        assert_eq!(executed[2].data[8..], 100_000_000u64.to_le_bytes());
        Ok(())
    }

    #[tokio::test]
    async fn zero_amount_is_refused_locally() {
        let ledger = MockLedger::new();
        ledger.set_balance(&payer().pubkey(), LAMPORTS_PER_SOL);
        let client = BootcampClient::new(ledger, ClientConfig::default());
        let args = WithdrawLiquidityArgs {
            amount: 0,
            ..args(false)
        };

        assert!(withdraw_liquidity(&client, payer(), &args).await.is_err());
        assert!(client.connection.calls().is_empty());
    }
}
