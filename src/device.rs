//! High-level ADXL34x device handle and lifecycle controller.
//!
//! A handle moves through
//! `Unattached → Identifying → Configuring → Active ⇄ Suspended → Detached`.
//! `Identifying` and `Configuring` only exist while [`Adxl34x::attach`] runs;
//! a failed attach always ends in `Detached`.

use crate::config::{Config, DEFAULT_CONFIG};
use crate::error::{Error, Result};
use crate::fifo::{self, Sample};
use crate::interface::Adxl34xInterface;
use crate::orientation::{Orientation, OrientationSettings};
use crate::params::Model;
use crate::registers::{
    self,
    FifoStatus,
    OrientStatus,
    PowerControl,
    REG_DEVID,
    REG_OFSX,
    REG_ORIENT,
    REG_ORIENT_CONF,
    REG_POWER_CTL,
};

/// Lifecycle state of a device handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Holds a transport, nothing attached yet.
    Unattached,
    /// Reading the identity register.
    Identifying,
    /// Programming the configuration registers.
    Configuring,
    /// Configured and measuring.
    Active,
    /// Configured with measurement disabled.
    Suspended,
    /// Torn down; every operation except `detach` is rejected.
    Detached,
}

/// High-level synchronous driver for one ADXL345/ADXL346.
///
/// `IFACE` may be an owned transport or a `&mut` borrow of one; the handle
/// gives it back on [`detach`](Self::detach).
pub struct Adxl34x<IFACE> {
    interface: Option<IFACE>,
    config: Option<Config>,
    model: Option<Model>,
    state: State,
}

impl<IFACE> Adxl34x<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates an unattached handle bound to the provided bus interface.
    pub fn new(interface: IFACE) -> Self {
        Self {
            interface: Some(interface),
            config: None,
            model: None,
            state: State::Unattached,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Model detected during attach.
    pub fn model(&self) -> Option<Model> {
        self.model
    }

    /// Descriptor captured during attach.
    pub fn config(&self) -> Option<&Config> {
        self.config.as_ref()
    }

    /// Returns `true` while the device is measuring.
    pub fn is_active(&self) -> bool {
        self.state == State::Active
    }

    /// Tears the handle down and hands back the transport.
    ///
    /// Software-only: no register is touched. On a handle that was never
    /// attached it is a no-op yielding `None`, and the handle can still be
    /// attached. Calling it again after the transport was returned also
    /// yields `None`.
    pub fn detach(&mut self) -> Option<IFACE> {
        match self.state {
            State::Unattached => return None,
            State::Detached => {}
            _ => log_debug!("adxl34x: {} -> Detached", self.state),
        }
        self.state = State::Detached;
        self.config = None;
        self.model = None;
        self.interface.take()
    }

    fn transition(&mut self, next: State) {
        log_debug!("adxl34x: {} -> {}", self.state, next);
        self.state = next;
    }
}

impl<IFACE, CommE> Adxl34x<IFACE>
where
    IFACE: Adxl34xInterface<Error = CommE>,
{
    // ==================================================================
    // == Lifecycle ======================================================
    // ==================================================================
    /// Identifies the device and programs `config`, or [`DEFAULT_CONFIG`]
    /// when `None`.
    ///
    /// The descriptor is copied into the handle. On success the handle is
    /// `Active`. On any bus or identification failure it is `Detached`
    /// and the transport can still be recovered with
    /// [`detach`](Self::detach). An invalid descriptor is rejected before
    /// any bus traffic and leaves the handle `Unattached`.
    pub fn attach(&mut self, config: Option<Config>) -> Result<Model, CommE> {
        if self.state != State::Unattached {
            return Err(Error::InvalidState);
        }

        let config = config.unwrap_or(DEFAULT_CONFIG);
        config.validate().map_err(|_| Error::InvalidConfig)?;

        match self.identify_and_program(&config) {
            Ok(model) => {
                self.model = Some(model);
                self.config = Some(config);
                self.transition(State::Active);
                Ok(model)
            }
            Err(err) => {
                log_warn!("adxl34x: attach failed in {}", self.state);
                self.config = None;
                self.model = None;
                self.transition(State::Detached);
                Err(err)
            }
        }
    }

    /// Clears the measure bit, keeping every other configuration bit.
    ///
    /// A no-op when already suspended. Bus failures are returned and the
    /// handle stays `Active`.
    pub fn suspend(&mut self) -> Result<(), CommE> {
        match self.state {
            State::Active => {}
            State::Suspended => return Ok(()),
            _ => return Err(Error::InvalidState),
        }

        if let Err(err) = self.mutate_power_control(|power| power.set_measure(false)) {
            log_warn!("adxl34x: suspend failed, staying active");
            return Err(err);
        }
        self.transition(State::Suspended);
        Ok(())
    }

    /// Re-asserts the measure bit.
    ///
    /// A no-op when already active. Bus failures are returned and the
    /// handle stays `Suspended`.
    pub fn resume(&mut self) -> Result<(), CommE> {
        match self.state {
            State::Suspended => {}
            State::Active => return Ok(()),
            _ => return Err(Error::InvalidState),
        }

        if let Err(err) = self.mutate_power_control(|power| power.set_measure(true)) {
            log_warn!("adxl34x: resume failed, staying suspended");
            return Err(err);
        }
        self.transition(State::Active);
        Ok(())
    }

    // ==================================================================
    // == Data Acquisition & FIFO =======================================
    // ==================================================================
    /// Reads a raw acceleration triplet with one block read.
    pub fn read_xyz_raw(&mut self) -> Result<[i16; 3], CommE> {
        self.require(&[State::Active])?;
        Ok(fifo::read_sample(self.bus()?)?.to_array())
    }

    /// Returns acceleration scaled in milli-g per the attached data format.
    pub fn read_xyz_mg(&mut self) -> Result<[i32; 3], CommE> {
        self.require(&[State::Active])?;
        let sample = fifo::read_sample(self.bus()?)?;
        let config = self.config.ok_or(Error::InvalidState)?;
        Ok(sample.to_mg(&config))
    }

    /// Returns the decoded `FIFO_STATUS` register.
    pub fn read_fifo_status(&mut self) -> Result<FifoStatus, CommE> {
        self.require(&[State::Active])?;
        fifo::read_fifo_status(self.bus()?)
    }

    /// Drains buffered FIFO samples into `samples`.
    pub fn read_fifo_samples(&mut self, samples: &mut [Sample]) -> Result<usize, CommE> {
        self.require(&[State::Active])?;
        fifo::read_fifo_samples(self.bus()?, samples)
    }

    // ==================================================================
    // == Calibration & Readback ========================================
    // ==================================================================
    /// Writes the X, Y and Z offset trims (15.6 mg/LSB).
    pub fn set_offsets(&mut self, offsets: [i8; 3]) -> Result<(), CommE> {
        self.require(&[State::Active, State::Suspended])?;
        let bus = self.bus()?;
        for (register, offset) in (REG_OFSX..).zip(offsets) {
            bus.write_register(register, offset as u8)?;
        }
        Ok(())
    }

    /// Reads the X, Y and Z offset trims.
    pub fn read_offsets(&mut self) -> Result<[i8; 3], CommE> {
        self.require(&[State::Active, State::Suspended])?;
        let mut raw = [0u8; 3];
        self.bus()?.read_many(REG_OFSX, &mut raw)?;
        Ok(raw.map(|byte| byte as i8))
    }

    /// Reads the programmed registers back and decodes them.
    ///
    /// Event codes are not stored on the device and come from the captured
    /// descriptor.
    pub fn read_config(&mut self) -> Result<Config, CommE> {
        self.require(&[State::Active, State::Suspended])?;
        let mut decoded = self.config.ok_or(Error::InvalidState)?;
        let registers = decoded.register_program().registers();
        let bus = self.bus()?;
        for register in registers {
            let value = bus.read_register(register)?;
            decoded.apply_register(register, value);
        }
        Ok(decoded)
    }

    // ==================================================================
    // == Orientation (ADXL346) =========================================
    // ==================================================================
    /// Programs `ORIENT_CONF`. Rejected with `InvalidState` on the ADXL345.
    pub fn configure_orientation(&mut self, settings: OrientationSettings) -> Result<(), CommE> {
        self.require_register(REG_ORIENT_CONF)?;
        self.bus()?
            .write_register(REG_ORIENT_CONF, u8::from(settings.to_register()))?;
        Ok(())
    }

    /// Reads the current orientation. Rejected with `InvalidState` on the ADXL345.
    pub fn read_orientation(&mut self) -> Result<Orientation, CommE> {
        self.require_register(REG_ORIENT)?;
        let raw = self.bus()?.read_register(REG_ORIENT)?;
        Ok(Orientation::from(OrientStatus::from(raw)))
    }

    // ==================================================================
    // == Internal Helpers ==============================================
    // ==================================================================
    fn require(&self, allowed: &[State]) -> Result<(), CommE> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(Error::InvalidState)
        }
    }

    fn bus(&mut self) -> Result<&mut IFACE, CommE> {
        self.interface.as_mut().ok_or(Error::InvalidState)
    }

    // Registers flagged extended-only in the register map need an ADXL346.
    fn require_register(&self, register: u8) -> Result<(), CommE> {
        self.require(&[State::Active, State::Suspended])?;
        if !registers::is_extended_only(register) {
            return Ok(());
        }
        match self.model {
            Some(model) if model.is_extended() => Ok(()),
            _ => Err(Error::InvalidState),
        }
    }

    fn identify_and_program(&mut self, config: &Config) -> Result<Model, CommE> {
        self.transition(State::Identifying);
        let model = self.identify()?;

        self.transition(State::Configuring);
        let bus = self.bus()?;
        for (register, value) in config.register_program().iter() {
            bus.write_register(register, value)
                .map_err(|source| Error::ProgrammingFailed { register, source })?;
        }

        Ok(model)
    }

    fn identify(&mut self) -> Result<Model, CommE> {
        let id = self.bus()?.read_register(REG_DEVID)?;
        match Model::from_device_id(id) {
            Some(model) => {
                log_info!("adxl34x: detected {}", model);
                Ok(model)
            }
            None => {
                log_warn!("adxl34x: unknown device id {=u8:#x}", id);
                Err(Error::UnknownDevice(id))
            }
        }
    }

    fn mutate_power_control<F>(&mut self, mut mutate: F) -> Result<PowerControl, CommE>
    where
        F: FnMut(&mut PowerControl),
    {
        let bus = self.bus()?;
        let current = bus.read_register(REG_POWER_CTL)?;

        let mut power = PowerControl::from(current);
        mutate(&mut power);

        let updated = u8::from(power);
        if updated != current {
            bus.write_register(REG_POWER_CTL, updated)?;
        }

        Ok(power)
    }
}

#[cfg(test)]
mod tests {
    use std::vec;
    use std::vec::Vec;

    use super::*;
    use crate::config::PROGRAM_LEN;
    use crate::interface::fake::{BusFault, FakeBus, Op};
    use crate::params::{AxisSet, FifoMode, Orientation2d, Range, WakeUpFrequency};
    use crate::registers::{ID_ADXL345, ID_ADXL346, REG_FIFO_STATUS, REG_TAP_AXES, REG_THRESH_TAP};

    fn attached(id: u8) -> Adxl34x<FakeBus> {
        let mut device = Adxl34x::new(FakeBus::new(id));
        device.attach(None).unwrap();
        device.interface.as_mut().unwrap().clear_ops();
        device
    }

    fn ops(device: &Adxl34x<FakeBus>) -> &[Op] {
        &device.interface.as_ref().unwrap().ops
    }

    #[test]
    fn attach_detects_base_model() {
        let mut device = Adxl34x::new(FakeBus::new(ID_ADXL345));
        assert_eq!(device.state(), State::Unattached);
        assert_eq!(device.attach(None), Ok(Model::Adxl345));
        assert_eq!(device.state(), State::Active);
        assert_eq!(device.model(), Some(Model::Adxl345));
        assert_eq!(device.config(), Some(&DEFAULT_CONFIG));
    }

    #[test]
    fn attach_detects_extended_model() {
        let mut device = Adxl34x::new(FakeBus::new(ID_ADXL346));
        assert_eq!(device.attach(None), Ok(Model::Adxl346));
        assert!(device.is_active());
    }

    #[test]
    fn unknown_identity_aborts_before_any_write() {
        for id in [0x00, 0xE4, 0xE7, 0xFF] {
            let mut device = Adxl34x::new(FakeBus::new(id));
            assert_eq!(device.attach(None), Err(Error::UnknownDevice(id)));
            assert_eq!(device.state(), State::Detached);
            assert_eq!(device.model(), None);
            assert_eq!(ops(&device), &[Op::Read(REG_DEVID)]);
        }
    }

    #[test]
    fn identification_bus_error_is_a_transport_failure() {
        let mut bus = FakeBus::new(ID_ADXL345);
        bus.fail_reads = true;
        let mut device = Adxl34x::new(bus);
        assert_eq!(device.attach(None), Err(Error::Interface(BusFault)));
        assert_eq!(device.state(), State::Detached);
        assert!(device.detach().is_some_and(|bus| bus.writes().is_empty()));
    }

    #[test]
    fn attach_writes_follow_program_order_with_power_last() {
        let config = Config::new()
            .tap_axes(AxisSet::X, true)
            .range(Range::G16, true)
            .fifo(FifoMode::Fifo, 10)
            .build();
        let mut device = Adxl34x::new(FakeBus::new(ID_ADXL345));
        device.attach(Some(config)).unwrap();

        let bus = device.detach().unwrap();
        let writes = bus.writes();
        let expected: Vec<(u8, u8)> = config.register_program().iter().collect();
        assert_eq!(writes, expected);
        assert_eq!(writes.len(), PROGRAM_LEN);
        assert_eq!(writes.last().map(|w| w.0), Some(REG_POWER_CTL));
        assert_eq!(bus.ops[0], Op::Read(REG_DEVID));
    }

    #[test]
    fn write_failure_at_each_step_aborts_and_names_the_register() {
        let registers = DEFAULT_CONFIG.register_program().registers();
        for (step, register) in registers.iter().copied().enumerate() {
            let mut bus = FakeBus::new(ID_ADXL346);
            bus.fail_write_at = Some(step);
            let mut device = Adxl34x::new(bus);

            assert_eq!(
                device.attach(None),
                Err(Error::ProgrammingFailed {
                    register,
                    source: BusFault
                })
            );
            assert_eq!(device.state(), State::Detached);
            assert_eq!(device.config(), None);
            assert_eq!(device.suspend(), Err(Error::InvalidState));

            let bus = device.detach().unwrap();
            assert_eq!(bus.writes().len(), step + 1);
        }
    }

    #[test]
    fn invalid_descriptor_is_rejected_without_bus_traffic() {
        let config = Config::new().fifo(FifoMode::Stream, 40).build();
        let mut device = Adxl34x::new(FakeBus::new(ID_ADXL345));
        assert_eq!(device.attach(Some(config)), Err(Error::InvalidConfig));
        assert_eq!(device.state(), State::Unattached);
        assert!(ops(&device).is_empty());
        assert_eq!(device.attach(None), Ok(Model::Adxl345));
    }

    #[test]
    fn attach_twice_is_rejected() {
        let mut device = attached(ID_ADXL345);
        assert_eq!(device.attach(None), Err(Error::InvalidState));
        assert!(ops(&device).is_empty());
    }

    #[test]
    fn captured_descriptor_is_a_copy() {
        let mut config = Config::new().free_fall(9, 50).build();
        let mut device = Adxl34x::new(FakeBus::new(ID_ADXL345));
        device.attach(Some(config)).unwrap();
        config.free_fall_threshold = 200;
        assert_ne!(device.config(), Some(&config));
        assert_eq!(device.config().map(|c| c.free_fall_threshold), Some(9));
        assert_eq!(device.read_config().map(|c| c.free_fall_threshold), Ok(9));
    }

    #[test]
    fn suspend_then_resume_restores_power_control() {
        let config = Config::new()
            .power(true, true, WakeUpFrequency::Hz2)
            .build();
        let mut device = Adxl34x::new(FakeBus::new(ID_ADXL345));
        device.attach(Some(config)).unwrap();
        let before = device.interface.as_ref().unwrap().registers[usize::from(REG_POWER_CTL)];

        device.suspend().unwrap();
        assert_eq!(device.state(), State::Suspended);
        let suspended = device.interface.as_ref().unwrap().registers[usize::from(REG_POWER_CTL)];
        assert_eq!(suspended, before & !0x08);

        device.resume().unwrap();
        assert_eq!(device.state(), State::Active);
        let after = device.interface.as_ref().unwrap().registers[usize::from(REG_POWER_CTL)];
        assert_eq!(after, before);
    }

    #[test]
    fn repeated_suspend_and_resume_are_noops() {
        let mut device = attached(ID_ADXL345);
        device.resume().unwrap();
        assert!(ops(&device).is_empty());

        device.suspend().unwrap();
        device.interface.as_mut().unwrap().clear_ops();
        device.suspend().unwrap();
        assert!(ops(&device).is_empty());
        assert_eq!(device.state(), State::Suspended);
    }

    #[test]
    fn suspend_failure_keeps_state() {
        let mut device = attached(ID_ADXL345);
        device.interface.as_mut().unwrap().fail_reads = true;
        assert_eq!(device.suspend(), Err(Error::Interface(BusFault)));
        assert_eq!(device.state(), State::Active);
    }

    #[test]
    fn resume_write_failure_keeps_state() {
        let mut device = attached(ID_ADXL345);
        device.suspend().unwrap();
        // Attach issued 15 writes and suspend one more.
        device.interface.as_mut().unwrap().fail_write_at = Some(PROGRAM_LEN + 1);
        assert_eq!(device.resume(), Err(Error::Interface(BusFault)));
        assert_eq!(device.state(), State::Suspended);
    }

    #[test]
    fn lifecycle_operations_on_unattached_handle_touch_nothing() {
        let mut device = Adxl34x::new(FakeBus::new(ID_ADXL345));
        assert_eq!(device.suspend(), Err(Error::InvalidState));
        assert_eq!(device.resume(), Err(Error::InvalidState));
        assert_eq!(device.read_xyz_raw(), Err(Error::InvalidState));
        assert!(ops(&device).is_empty());
    }

    #[test]
    fn detach_before_attach_is_a_noop() {
        let mut device = Adxl34x::new(FakeBus::new(ID_ADXL345));
        assert!(device.detach().is_none());
        assert!(device.detach().is_none());
        assert_eq!(device.state(), State::Unattached);
        assert!(ops(&device).is_empty());

        assert_eq!(device.attach(None), Ok(Model::Adxl345));
        assert_eq!(device.state(), State::Active);
    }

    #[test]
    fn detach_is_idempotent_and_software_only() {
        let mut device = attached(ID_ADXL345);
        let bus = device.detach().unwrap();
        assert!(bus.ops.is_empty());
        assert_eq!(device.state(), State::Detached);
        assert_eq!(device.config(), None);

        assert!(device.detach().is_none());
        assert_eq!(device.state(), State::Detached);
        assert_eq!(device.suspend(), Err(Error::InvalidState));
        assert_eq!(device.resume(), Err(Error::InvalidState));
        assert_eq!(device.attach(None), Err(Error::InvalidState));
    }

    #[test]
    fn handle_can_borrow_its_transport() {
        let mut bus = FakeBus::new(ID_ADXL346);
        {
            let mut device = Adxl34x::new(&mut bus);
            device.attach(None).unwrap();
            device.suspend().unwrap();
            device.detach();
        }
        assert_eq!(bus.registers[usize::from(REG_POWER_CTL)], 0x30);
        assert_eq!(bus.registers[usize::from(REG_THRESH_TAP)], 35);
    }

    #[test]
    fn xyz_reads_use_the_output_registers() {
        let mut device = attached(ID_ADXL345);
        device.interface.as_mut().unwrap().registers[0x32..0x38]
            .copy_from_slice(&[0x00, 0x01, 0x00, 0xFF, 0x40, 0x00]);

        assert_eq!(device.read_xyz_raw(), Ok([256, -256, 64]));
        assert_eq!(device.read_xyz_mg(), Ok([998, -998, 249]));

        device.suspend().unwrap();
        assert_eq!(device.read_xyz_raw(), Err(Error::InvalidState));
    }

    #[test]
    fn fifo_is_drained_through_the_handle() {
        let mut device = attached(ID_ADXL345);
        device.interface.as_mut().unwrap().registers[usize::from(REG_FIFO_STATUS)] = 3;
        let mut samples = [Sample::default(); 2];
        assert_eq!(device.read_fifo_samples(&mut samples), Ok(2));
        assert_eq!(device.read_fifo_status().map(|s| s.entries()), Ok(3));
    }

    #[test]
    fn offsets_round_trip_while_suspended() {
        let mut device = attached(ID_ADXL345);
        device.suspend().unwrap();
        device.set_offsets([-3, 0, 127]).unwrap();
        assert_eq!(device.read_offsets(), Ok([-3, 0, 127]));
        assert_eq!(
            device.interface.as_ref().unwrap().writes()[1..],
            [(0x1E, 0xFD), (0x1F, 0x00), (0x20, 0x7F)]
        );
    }

    #[test]
    fn read_config_decodes_the_programmed_registers() {
        let config = Config::new()
            .tap_axes(AxisSet::Y | AxisSet::Z, false)
            .range(Range::G4, false)
            .fifo(FifoMode::Bypass, 0)
            .build();
        let mut device = Adxl34x::new(FakeBus::new(ID_ADXL345));
        device.attach(Some(config)).unwrap();
        device.suspend().unwrap();

        assert_eq!(device.read_config(), Ok(config));
    }

    #[test]
    fn read_config_reflects_register_drift() {
        let mut device = attached(ID_ADXL345);
        device.interface.as_mut().unwrap().registers[usize::from(REG_TAP_AXES)] = 0x00;
        let decoded = device.read_config().unwrap();
        assert!(decoded.tap_axes.is_empty());
    }

    #[test]
    fn register_map_gates_extended_registers_by_model() {
        let base = attached(ID_ADXL345);
        assert_eq!(base.require_register(REG_POWER_CTL), Ok(()));
        assert_eq!(base.require_register(REG_ORIENT_CONF), Err(Error::InvalidState));
        assert_eq!(base.require_register(REG_ORIENT), Err(Error::InvalidState));

        let extended = attached(ID_ADXL346);
        assert_eq!(extended.require_register(REG_ORIENT_CONF), Ok(()));
        assert_eq!(extended.require_register(REG_ORIENT), Ok(()));

        let unattached = Adxl34x::new(FakeBus::new(ID_ADXL346));
        assert_eq!(unattached.require_register(REG_POWER_CTL), Err(Error::InvalidState));
    }

    #[test]
    fn orientation_requires_the_extended_model() {
        let mut base = attached(ID_ADXL345);
        assert_eq!(base.read_orientation(), Err(Error::InvalidState));
        assert_eq!(
            base.configure_orientation(OrientationSettings::default()),
            Err(Error::InvalidState)
        );
        assert!(ops(&base).is_empty());

        let mut extended = attached(ID_ADXL346);
        extended.interface.as_mut().unwrap().registers[usize::from(REG_ORIENT)] = 0b0100_1001;
        let orientation = extended.read_orientation().unwrap();
        assert_eq!(orientation.planar, Some(Orientation2d::PortraitPositive));
        extended
            .configure_orientation(OrientationSettings {
                dead_zone: 1,
                divisor: 2,
                interrupt: false,
                interrupt_3d: true,
            })
            .unwrap();
        assert_eq!(
            extended.interface.as_ref().unwrap().writes(),
            vec![(REG_ORIENT_CONF, 0b0001_1010)]
        );
    }
}
