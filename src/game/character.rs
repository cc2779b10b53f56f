//! Characters: players and NPCs, with health, inventory and turn behaviour.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ActionError, PieceStateError};
use crate::game::{Board, CapabilityKind, Direction, Piece, PieceId};

/// Health a character starts with.
pub const DEFAULT_HEALTH: u32 = 10;
/// Damage a character deals per attack unless told otherwise.
pub const DEFAULT_ATTACK_DAMAGE: u32 = 1;

/// Groups of player actions; a player's turn passes after actions of some classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionClass {
    /// Moving around.
    Move,
    /// Attacking a neighbour.
    Attack,
    /// Picking up an item.
    GrabItem,
    /// Using an item from the inventory.
    UseItem,
}

impl ActionClass {
    /// The classes that pass the turn unless configured otherwise.
    #[must_use]
    pub fn default_turn_passing() -> BTreeSet<Self> {
        BTreeSet::from([Self::UseItem, Self::GrabItem, Self::Move])
    }
}

/// One thing a player can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    /// Step in a direction.
    Move(Direction),
    /// Attack the neighbour in a direction.
    Attack(Direction),
    /// Grab the first item found around the player.
    GrabItem,
    /// Use the item at this inventory slot.
    UseItem(usize),
    /// Invoke a named action of one of the player's capabilities.
    Named {
        /// Which capability the action belongs to.
        kind: CapabilityKind,
        /// Name of the action.
        name: String,
    },
}

impl PlayerAction {
    /// The class this action belongs to.
    #[must_use]
    pub const fn class(&self) -> ActionClass {
        match self {
            Self::Move(_)
            | Self::Named {
                kind: CapabilityKind::Moving,
                ..
            } => ActionClass::Move,
            Self::Attack(_)
            | Self::Named {
                kind: CapabilityKind::Attacking,
                ..
            } => ActionClass::Attack,
            Self::GrabItem
            | Self::Named {
                kind: CapabilityKind::Grabbing,
                ..
            } => ActionClass::GrabItem,
            Self::UseItem(_) => ActionClass::UseItem,
        }
    }
}

/// What a character does on its own once per elapsed turn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Passive {
    /// Nothing.
    #[default]
    Idle,
    /// Make a random valid move.
    Wander,
    /// Make a random valid attack, then a random valid move.
    Aggressive,
    /// Run the board hook with this name.
    Hook(String),
}

/// Whether a character is controlled by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    /// Controlled by the user.
    Player {
        /// Action classes after which the turn passes.
        turn_passing: BTreeSet<ActionClass>,
    },
    /// Controlled by its passive behaviour.
    Npc,
}

impl Role {
    /// A player role with the default turn-passing classes.
    #[must_use]
    pub fn player() -> Self {
        Self::Player {
            turn_passing: ActionClass::default_turn_passing(),
        }
    }
}

/// Character state carried by player and NPC pieces.
#[derive(Debug, Clone)]
pub struct Character {
    role: Role,
    /// `None` for characters that cannot be hurt.
    health: Option<u32>,
    attack_damage: Option<u32>,
    pub(super) inventory: Vec<Piece>,
    passive: Passive,
}

impl Character {
    /// A healthy character with an empty inventory and no passive behaviour.
    #[must_use]
    pub const fn new(role: Role) -> Self {
        Self {
            role,
            health: Some(DEFAULT_HEALTH),
            attack_damage: Some(DEFAULT_ATTACK_DAMAGE),
            inventory: Vec::new(),
            passive: Passive::Idle,
        }
    }

    /// Set the passive behaviour.
    #[must_use]
    pub fn with_passive(mut self, passive: Passive) -> Self {
        self.passive = passive;
        self
    }

    /// Set the starting health.
    #[must_use]
    pub const fn with_health(mut self, health: u32) -> Self {
        self.health = Some(health);
        self
    }

    /// Make the character immune to damage.
    #[must_use]
    pub const fn invulnerable(mut self) -> Self {
        self.health = None;
        self
    }

    /// Set the attack damage; `None` makes the character unable to attack.
    #[must_use]
    pub const fn with_attack_damage(mut self, damage: Option<u32>) -> Self {
        self.attack_damage = damage;
        self
    }

    /// Set the classes of actions that pass the turn. No effect on NPCs.
    #[must_use]
    pub fn with_turn_passing(mut self, classes: impl IntoIterator<Item = ActionClass>) -> Self {
        if let Role::Player { turn_passing } = &mut self.role {
            *turn_passing = classes.into_iter().collect();
        }
        self
    }

    /// Start with these items in the inventory.
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = Piece>) -> Self {
        self.inventory.extend(items);
        self
    }

    /// Player or NPC.
    #[must_use]
    pub const fn role(&self) -> &Role {
        &self.role
    }

    /// Whether the user controls this character.
    #[must_use]
    pub const fn is_player(&self) -> bool {
        matches!(self.role, Role::Player { .. })
    }

    /// Whether an action of `class` passes the turn.
    #[must_use]
    pub fn passes_turn(&self, class: ActionClass) -> bool {
        match &self.role {
            Role::Player { turn_passing } => turn_passing.contains(&class),
            Role::Npc => false,
        }
    }

    /// Remaining health, `None` if the character cannot be hurt.
    #[must_use]
    pub const fn health(&self) -> Option<u32> {
        self.health
    }

    /// Whether the character ignores damage.
    #[must_use]
    pub const fn is_invulnerable(&self) -> bool {
        self.health.is_none()
    }

    /// Whether health has run out.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        matches!(self.health, Some(0))
    }

    /// Damage dealt per attack.
    #[must_use]
    pub const fn attack_damage(&self) -> Option<u32> {
        self.attack_damage
    }

    /// Lose `damage` health, stopping at zero.
    pub fn take_damage(&mut self, damage: u32) {
        if let Some(health) = &mut self.health {
            *health = health.saturating_sub(damage);
        }
    }

    /// Regain `amount` health.
    pub fn heal(&mut self, amount: u32) {
        if let Some(health) = &mut self.health {
            *health = health.saturating_add(amount);
        }
    }

    /// Carried items, oldest first.
    #[must_use]
    pub fn inventory(&self) -> &[Piece] {
        &self.inventory
    }

    /// The passive behaviour.
    #[must_use]
    pub const fn passive(&self) -> &Passive {
        &self.passive
    }
}

impl Board {
    /// Use the item at inventory slot `index` of `piece`.
    ///
    /// The item is consumed when its effect succeeds and stays in the
    /// inventory otherwise.
    ///
    /// # Errors
    ///
    /// [`ActionError::NoInventory`] if `piece` is not a character,
    /// [`ActionError::NoSuchItem`] if the slot is empty, and
    /// [`PieceStateError::NotOnATile`] if the character is not placed.
    pub fn use_item_unchecked(
        &mut self,
        piece: PieceId,
        index: usize,
    ) -> Result<bool, ActionError> {
        let character = self
            .piece(piece)
            .ok_or(PieceStateError::NotOnATile)?
            .character()
            .ok_or(ActionError::NoInventory)?;
        let effect = character
            .inventory()
            .get(index)
            .and_then(Piece::item)
            .map(|i| i.effect().clone())
            .ok_or(ActionError::NoSuchItem { index })?;
        let range: Vec<_> = self.adjacent_to_piece(piece)?.tiles().collect();

        // The item stays out of the inventory while its effect runs.
        let Some(item) = self.inventory_mut(piece).map(|inv| inv.remove(index)) else {
            return Err(ActionError::NoInventory);
        };
        let done = self.apply_item_effect(&effect, piece, &range);
        let unused = self.inventory_mut(piece).filter(|_| !done);
        if let Some(inventory) = unused {
            inventory.insert(index.min(inventory.len()), item);
        }
        debug!(?piece, index, ?effect, done, "item used");
        Ok(done)
    }

    fn inventory_mut(&mut self, piece: PieceId) -> Option<&mut Vec<Piece>> {
        self.piece_mut(piece)
            .and_then(Piece::character_mut)
            .map(|c| &mut c.inventory)
    }

    /// Safe version of [`Board::use_item_unchecked`].
    pub fn use_item(&mut self, piece: PieceId, index: usize) -> bool {
        self.use_item_unchecked(piece, index).unwrap_or_else(|e| {
            debug!(?piece, index, error = %e, "cannot use item");
            false
        })
    }

    /// Grab an item from the tiles around `piece`, trying up, right, down
    /// and left in turn. Returns whether something was picked up.
    pub fn grab_item_from_surroundings(&mut self, piece: PieceId) -> bool {
        let Ok(adjacent) = self.adjacent_to_piece(piece) else {
            return false;
        };
        adjacent
            .tiles()
            .collect::<Vec<_>>()
            .into_iter()
            .any(|tile| self.grab_unchecked(piece, tile).unwrap_or(false))
    }
}
