use std::cell::RefCell;
use std::rc::Rc;

use crate::cartridge::Cartridge;
use crate::interfaces::Bus;

pub type SharedBus = Rc<RefCell<dyn Bus>>;
pub type SharedCartridge = Rc<RefCell<Cartridge>>;
