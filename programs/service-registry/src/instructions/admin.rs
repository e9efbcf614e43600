use anchor_lang::prelude::*;

use crate::{
    events::{
        DepositPolicyUpdatedEvent, DrainerUpdatedEvent, ManagerUpdatedEvent,
        MultisigPermissionUpdatedEvent, OwnerUpdatedEvent,
    },
    ledger::DepositPolicy,
    processor,
    state::ServiceRegistry,
};

#[derive(Accounts)]
pub struct ChangeRegistry<'info> {
    #[account(mut)]
    pub registry: Account<'info, ServiceRegistry>,

    pub user: Signer<'info>,
}

pub fn change_owner_handler(ctx: Context<ChangeRegistry>, new_owner: Pubkey) -> Result<()> {
    processor::change_owner(&mut ctx.accounts.registry, ctx.accounts.user.key, new_owner)?;
    emit!(OwnerUpdatedEvent { new_owner });
    Ok(())
}

pub fn change_manager_handler(ctx: Context<ChangeRegistry>, new_manager: Pubkey) -> Result<()> {
    processor::change_manager(&mut ctx.accounts.registry, ctx.accounts.user.key, new_manager)?;
    emit!(ManagerUpdatedEvent { new_manager });
    Ok(())
}

pub fn change_drainer_handler(ctx: Context<ChangeRegistry>, new_drainer: Pubkey) -> Result<()> {
    processor::change_drainer(&mut ctx.accounts.registry, ctx.accounts.user.key, new_drainer)?;
    emit!(DrainerUpdatedEvent { new_drainer });
    Ok(())
}

pub fn change_multisig_permission_handler(
    ctx: Context<ChangeRegistry>,
    implementation: Pubkey,
    permission: bool,
) -> Result<()> {
    processor::change_multisig_permission(
        &mut ctx.accounts.registry,
        ctx.accounts.user.key,
        implementation,
        permission,
    )?;
    msg!("Multisig implementation {} permitted: {}", implementation, permission);
    emit!(MultisigPermissionUpdatedEvent {
        implementation,
        permission,
    });
    Ok(())
}

pub fn change_deposit_policy_handler(
    ctx: Context<ChangeRegistry>,
    policy: DepositPolicy,
) -> Result<()> {
    processor::change_deposit_policy(&mut ctx.accounts.registry, ctx.accounts.user.key, policy)?;
    emit!(DepositPolicyUpdatedEvent { policy });
    Ok(())
}
