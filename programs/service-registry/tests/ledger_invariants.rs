use anchor_lang::prelude::*;
use proptest::prelude::*;

use service_registry::{
    error::ErrorCode,
    multisig::MultisigAdapter,
    processor,
    service::ServiceConfig,
    state::{AgentParams, ServiceAccount, ServiceRegistry},
    treasury::Treasury,
    validator::OpaqueAgentIds,
};

const OWNER: u8 = 1;
const MANAGER: u8 = 2;
const DRAINER: u8 = 3;
const SERVICE_OWNER: u8 = 4;
const OPERATOR: u8 = 5;
const INSTANCE: u8 = 6;
const MULTISIG: u8 = 7;
const FACTORY: u8 = 8;

const BONDS: [u64; 2] = [100, 250];
const MAX_SERVICES: usize = 3;

fn key(tag: u8, n: u32) -> Pubkey {
    let mut bytes = [0u8; 32];
    bytes[0] = tag;
    bytes[1..5].copy_from_slice(&n.to_le_bytes());
    Pubkey::new_from_array(bytes)
}

fn config() -> ServiceConfig {
    ServiceConfig {
        config_hash: [7u8; 32],
        agent_ids: vec![1, 2],
        agent_params: vec![
            AgentParams {
                slots: 2,
                bond: BONDS[0],
            },
            AgentParams {
                slots: 1,
                bond: BONDS[1],
            },
        ],
        threshold: 2,
    }
}

#[derive(Default)]
struct Escrow {
    balance: u64,
    collected: u64,
    paid: u64,
    rejecting: bool,
}

impl Treasury for Escrow {
    fn collect(&mut self, _from: &Pubkey, amount: u64) -> Result<()> {
        require!(!self.rejecting, ErrorCode::TransferFailed);
        self.balance = self.balance.checked_add(amount).ok_or(ErrorCode::Overflow)?;
        self.collected += amount;
        Ok(())
    }

    fn pay(&mut self, _to: &Pubkey, amount: u64) -> Result<()> {
        require!(!self.rejecting, ErrorCode::TransferFailed);
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(ErrorCode::TransferFailed)?;
        self.paid += amount;
        Ok(())
    }
}

struct Factory {
    wallet: Pubkey,
}

impl MultisigAdapter for Factory {
    fn implementation(&self) -> Pubkey {
        key(FACTORY, 0)
    }

    fn create_wallet(&mut self, owners: &[Pubkey], threshold: u32, _payload: &[u8]) -> Result<Pubkey> {
        assert!(threshold as usize <= owners.len());
        Ok(self.wallet)
    }
}

#[derive(Clone, Debug)]
enum Op {
    Create,
    Activate { service: usize },
    Register {
        service: usize,
        operator: u32,
        agent_ids: Vec<u32>,
        exact_value: bool,
    },
    Deploy { service: usize },
    Slash { service: usize, instance: usize, amount: u64 },
    Terminate { service: usize },
    Unbond { service: usize, operator: u32 },
    Drain,
    RejectTransfers(bool),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Create),
        (0..MAX_SERVICES).prop_map(|service| Op::Activate { service }),
        (
            0..MAX_SERVICES,
            0..4u32,
            prop::collection::vec(prop::sample::select(vec![1u32, 2, 3]), 1..3),
            prop::bool::weighted(0.9),
        )
            .prop_map(|(service, operator, agent_ids, exact_value)| Op::Register {
                service,
                operator,
                agent_ids,
                exact_value,
            }),
        (0..MAX_SERVICES).prop_map(|service| Op::Deploy { service }),
        (0..MAX_SERVICES, 0..4usize, 0..400u64).prop_map(|(service, instance, amount)| {
            Op::Slash {
                service,
                instance,
                amount,
            }
        }),
        (0..MAX_SERVICES).prop_map(|service| Op::Terminate { service }),
        (0..MAX_SERVICES, 0..4u32).prop_map(|(service, operator)| Op::Unbond { service, operator }),
        Just(Op::Drain),
        any::<bool>().prop_map(Op::RejectTransfers),
    ]
}

struct World {
    registry: ServiceRegistry,
    services: Vec<ServiceAccount>,
    escrow: Escrow,
    next_instance: u32,
}

impl World {
    fn new() -> Self {
        Self {
            registry: ServiceRegistry {
                owner: key(OWNER, 0),
                manager: key(MANAGER, 0),
                drainer: key(DRAINER, 0),
                multisig_whitelist: vec![key(FACTORY, 0)],
                ..ServiceRegistry::default()
            },
            services: vec![],
            escrow: Escrow::default(),
            next_instance: 0,
        }
    }

    fn apply(&mut self, op: &Op) -> Result<()> {
        let manager = key(MANAGER, 0);
        let owner = key(SERVICE_OWNER, 0);
        let registry = &mut self.registry;

        match op {
            Op::Create => {
                if self.services.len() == MAX_SERVICES {
                    return Ok(());
                }
                let mut service = ServiceAccount::default();
                processor::create(registry, &mut service, &manager, owner, &config(), &OpaqueAgentIds)?;
                self.services.push(service);
                Ok(())
            }
            Op::Activate { service } => {
                let Some(service) = self.services.get_mut(*service) else {
                    return Ok(());
                };
                processor::activate_registration(registry, service, &manager, &owner, BONDS[1], &mut self.escrow)
            }
            Op::Register {
                service,
                operator,
                agent_ids,
                exact_value,
            } => {
                let Some(service) = self.services.get_mut(*service) else {
                    return Ok(());
                };
                let instances: Vec<Pubkey> = agent_ids
                    .iter()
                    .map(|_| {
                        self.next_instance += 1;
                        key(INSTANCE, self.next_instance)
                    })
                    .collect();
                let bond: u64 = agent_ids
                    .iter()
                    .map(|id| match id {
                        1 => BONDS[0],
                        2 => BONDS[1],
                        _ => 0,
                    })
                    .sum();
                let value = if *exact_value { bond } else { bond + 1 };
                processor::register_agents(
                    registry,
                    service,
                    &manager,
                    key(OPERATOR, *operator),
                    &instances,
                    agent_ids,
                    value,
                    &mut self.escrow,
                )
                .map(|_| ())
            }
            Op::Deploy { service: index } => {
                let Some(service) = self.services.get_mut(*index) else {
                    return Ok(());
                };
                let mut factory = Factory {
                    wallet: key(MULTISIG, *index as u32),
                };
                processor::deploy(registry, service, &manager, &owner, &mut factory, &[]).map(|_| ())
            }
            Op::Slash {
                service,
                instance,
                amount,
            } => {
                let Some(service) = self.services.get_mut(*service) else {
                    return Ok(());
                };
                let target = match service.agent_instances.len() {
                    0 => key(INSTANCE, u32::MAX),
                    len => service.agent_instances[instance % len].agent_instance,
                };
                let multisig = service.multisig;
                processor::slash(registry, service, &multisig, &[target], &[*amount]).map(|_| ())
            }
            Op::Terminate { service } => {
                let Some(service) = self.services.get_mut(*service) else {
                    return Ok(());
                };
                processor::terminate(registry, service, &manager, &owner, &mut self.escrow).map(|_| ())
            }
            Op::Unbond { service, operator } => {
                let Some(service) = self.services.get_mut(*service) else {
                    return Ok(());
                };
                processor::unbond(registry, service, &manager, &key(OPERATOR, *operator), &mut self.escrow)
                    .map(|_| ())
            }
            Op::Drain => processor::drain(registry, &key(DRAINER, 0), &mut self.escrow).map(|_| ()),
            Op::RejectTransfers(rejecting) => {
                self.escrow.rejecting = *rejecting;
                Ok(())
            }
        }
    }

    fn check(&self) -> std::result::Result<(), TestCaseError> {
        let ledger = &self.registry.ledger;
        prop_assert!(!self.registry.locked);
        prop_assert_eq!(self.escrow.balance, ledger.total_obligations().unwrap());
        prop_assert_eq!(self.escrow.collected - self.escrow.paid, self.escrow.balance);

        let deposits: u64 = self.services.iter().map(|s| s.security_deposit).sum();
        prop_assert_eq!(ledger.security_deposits, deposits);
        let bonds: u64 = self
            .services
            .iter()
            .flat_map(|s| s.operators.iter())
            .map(|o| o.balance)
            .sum();
        prop_assert_eq!(ledger.operator_bonds, bonds);

        for service in &self.services {
            prop_assert_eq!(service.num_agent_instances as usize, service.agent_instances.len());
            prop_assert!(service.num_agent_instances <= service.max_num_agent_instances);
            for param in &service.agent_params {
                prop_assert!(service.filled_slots(param.agent_id) <= param.slots);
            }
            for operator in &service.operators {
                let held = service
                    .agent_instances
                    .iter()
                    .filter(|i| i.operator == operator.operator)
                    .count();
                prop_assert_eq!(held, operator.num_instances as usize);
            }
            let counted: u32 = service.operators.iter().map(|o| o.num_instances).sum();
            prop_assert_eq!(counted, service.num_agent_instances);
        }
        Ok(())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn escrow_always_matches_ledger(ops in prop::collection::vec(op(), 1..60)) {
        let mut world = World::new();
        for op in &ops {
            let before = (
                world.registry.clone(),
                world.services.clone(),
                world.escrow.balance,
            );
            if world.apply(op).is_err() {
                let after = (
                    world.registry.clone(),
                    world.services.clone(),
                    world.escrow.balance,
                );
                prop_assert_eq!(before, after, "failed {:?} changed state", op);
            }
            world.check()?;
        }

        // Winding every service down returns the escrow to zero.
        world.apply(&Op::RejectTransfers(false)).unwrap();
        for index in 0..world.services.len() {
            let _ = world.apply(&Op::Terminate { service: index });
            for operator in 0..4 {
                let _ = world.apply(&Op::Unbond { service: index, operator });
            }
        }
        world.apply(&Op::Drain).unwrap();
        world.check()?;
        prop_assert_eq!(world.escrow.balance, 0);
        prop_assert_eq!(world.escrow.collected, world.escrow.paid);
    }

    #[test]
    fn slashing_never_exceeds_bond(amounts in prop::collection::vec(0..2_000u64, 1..8)) {
        let mut world = World::new();
        world.apply(&Op::Create).unwrap();
        world.apply(&Op::Activate { service: 0 }).unwrap();
        world
            .apply(&Op::Register {
                service: 0,
                operator: 0,
                agent_ids: vec![1, 1],
                exact_value: true,
            })
            .unwrap();
        world
            .apply(&Op::Register {
                service: 0,
                operator: 1,
                agent_ids: vec![2],
                exact_value: true,
            })
            .unwrap();
        world.apply(&Op::Deploy { service: 0 }).unwrap();

        let bonded = world.registry.ledger.operator_bonds;
        for (instance, amount) in amounts.iter().enumerate() {
            world
                .apply(&Op::Slash { service: 0, instance, amount: *amount })
                .unwrap();
            world.check()?;
        }
        let ledger = world.registry.ledger;
        prop_assert_eq!(ledger.operator_bonds + ledger.slashed_funds, bonded);
        prop_assert!(world.services[0].operators.iter().all(|o| o.balance <= BONDS[1]));
    }
}
