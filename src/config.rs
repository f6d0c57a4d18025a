//! Configuration primitives for the ADXL34x driver.
//!
//! A [`Config`] is the descriptor captured by value when a device is
//! attached. [`Config::register_program`] turns it into the ordered list of
//! register writes issued during attach, and [`Config::apply_register`]
//! decodes those registers back into descriptor fields.

use crate::params::{AxisSet, FifoMode, OutputDataRate, Range, WakeUpFrequency};
use crate::registers::{
    ActInactControl,
    BwRate,
    DataFormat,
    FifoControl,
    PowerControl,
    TapAxes,
    REG_ACT_INACT_CTL,
    REG_BW_RATE,
    REG_DATA_FORMAT,
    REG_DUR,
    REG_FIFO_CTL,
    REG_LATENT,
    REG_POWER_CTL,
    REG_TAP_AXES,
    REG_THRESH_ACT,
    REG_THRESH_FF,
    REG_THRESH_INACT,
    REG_THRESH_TAP,
    REG_TIME_FF,
    REG_TIME_INACT,
    REG_WINDOW,
};

/// Largest FIFO watermark expressible in `FIFO_CTL[4:0]`.
pub const MAX_WATERMARK: u8 = 31;

/// Input event type for absolute axes.
pub const EV_ABS: u16 = 0x03;
/// Absolute X axis code.
pub const ABS_X: u16 = 0x00;
/// Absolute Y axis code.
pub const ABS_Y: u16 = 0x01;
/// Absolute Z axis code.
pub const ABS_Z: u16 = 0x02;
/// Touch button code reported for taps.
pub const BTN_TOUCH: u16 = 0x14A;

/// Event codes a higher-level consumer reports for axis samples and taps.
///
/// The driver core stores these untouched; they never reach a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventMapping {
    /// Event type used for axis reports.
    pub ev_type: u16,
    /// Code reported for the X axis.
    pub code_x: u16,
    /// Code reported for the Y axis.
    pub code_y: u16,
    /// Code reported for the Z axis.
    pub code_z: u16,
    /// Codes reported for taps on X, Y and Z.
    pub code_tap: [u16; 3],
}

/// Process-wide fallback descriptor used when attach receives none.
pub const DEFAULT_CONFIG: Config = Config {
    tap_threshold: 35,
    tap_duration: 3,
    tap_latency: 20,
    tap_window: 20,
    tap_axes: AxisSet::ALL,
    suppress_double_tap: false,
    activity_axes: AxisSet::ALL,
    activity_ac_coupled: true,
    inactivity_axes: AxisSet::ALL,
    inactivity_ac_coupled: true,
    activity_threshold: 6,
    inactivity_threshold: 4,
    inactivity_time: 3,
    free_fall_threshold: 8,
    free_fall_time: 32,
    odr: OutputDataRate::Od25Hz,
    low_power: false,
    range: Range::G2,
    full_resolution: true,
    justify_left: false,
    int_active_low: false,
    spi_3wire: false,
    events: EventMapping {
        ev_type: EV_ABS,
        code_x: ABS_X,
        code_y: ABS_Y,
        code_z: ABS_Z,
        code_tap: [BTN_TOUCH; 3],
    },
    link: true,
    auto_sleep: true,
    wakeup: WakeUpFrequency::Hz8,
    fifo_mode: FifoMode::Stream,
    watermark: 0,
};

/// Configuration descriptor for an ADXL34x device.
///
/// Threshold and time fields are raw 8-bit register values; their scale
/// (62.5 mg/LSB, 625 µs/LSB, ...) is defined per register by the datasheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// `THRESH_TAP`: tap magnitude threshold.
    pub tap_threshold: u8,
    /// `DUR`: maximum time above threshold to count as a tap.
    pub tap_duration: u8,
    /// `LATENT`: wait after a tap before the double-tap window opens.
    pub tap_latency: u8,
    /// `WINDOW`: double-tap window length.
    pub tap_window: u8,
    /// Axes participating in tap detection.
    pub tap_axes: AxisSet,
    /// Suppress double taps when acceleration stays above threshold between taps.
    pub suppress_double_tap: bool,
    /// Axes participating in activity detection.
    pub activity_axes: AxisSet,
    /// AC-coupled activity detection.
    pub activity_ac_coupled: bool,
    /// Axes participating in inactivity detection.
    pub inactivity_axes: AxisSet,
    /// AC-coupled inactivity detection.
    pub inactivity_ac_coupled: bool,
    /// `THRESH_ACT`: activity threshold.
    pub activity_threshold: u8,
    /// `THRESH_INACT`: inactivity threshold.
    pub inactivity_threshold: u8,
    /// `TIME_INACT`: seconds below threshold before inactivity is declared.
    pub inactivity_time: u8,
    /// `THRESH_FF`: free-fall threshold.
    pub free_fall_threshold: u8,
    /// `TIME_FF`: minimum free-fall duration.
    pub free_fall_time: u8,
    /// Output data rate.
    pub odr: OutputDataRate,
    /// Reduced power operation.
    pub low_power: bool,
    /// g-range.
    pub range: Range,
    /// Full resolution output (4 mg/LSB on every range).
    pub full_resolution: bool,
    /// MSB-aligned output samples.
    pub justify_left: bool,
    /// Interrupt pins active low.
    pub int_active_low: bool,
    /// 3-wire SPI mode.
    pub spi_3wire: bool,
    /// Event codes for the input consumer.
    pub events: EventMapping,
    /// Link activity and inactivity detection.
    pub link: bool,
    /// Sleep automatically on inactivity.
    pub auto_sleep: bool,
    /// Sampling frequency while asleep.
    pub wakeup: WakeUpFrequency,
    /// FIFO operating mode.
    pub fifo_mode: FifoMode,
    /// FIFO watermark in samples (0..=31).
    pub watermark: u8,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration fits the register layout.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.watermark > MAX_WATERMARK {
            return Err(ConfigError::WatermarkOutOfRange);
        }

        Ok(())
    }

    /// `TAP_AXES` value derived from the descriptor.
    pub fn tap_axes_register(&self) -> TapAxes {
        TapAxes::new()
            .with_tap_x(self.tap_axes.contains(AxisSet::X))
            .with_tap_y(self.tap_axes.contains(AxisSet::Y))
            .with_tap_z(self.tap_axes.contains(AxisSet::Z))
            .with_suppress(self.suppress_double_tap)
    }

    /// `ACT_INACT_CTL` value derived from the descriptor.
    pub fn act_inact_register(&self) -> ActInactControl {
        ActInactControl::new()
            .with_act_ac(self.activity_ac_coupled)
            .with_act_x(self.activity_axes.contains(AxisSet::X))
            .with_act_y(self.activity_axes.contains(AxisSet::Y))
            .with_act_z(self.activity_axes.contains(AxisSet::Z))
            .with_inact_ac(self.inactivity_ac_coupled)
            .with_inact_x(self.inactivity_axes.contains(AxisSet::X))
            .with_inact_y(self.inactivity_axes.contains(AxisSet::Y))
            .with_inact_z(self.inactivity_axes.contains(AxisSet::Z))
    }

    /// `BW_RATE` value derived from the descriptor.
    pub fn bw_rate_register(&self) -> BwRate {
        BwRate::new()
            .with_rate(self.odr)
            .with_low_power(self.low_power)
    }

    /// `DATA_FORMAT` value derived from the descriptor. Self-test is always off.
    pub fn data_format_register(&self) -> DataFormat {
        DataFormat::new()
            .with_range(self.range)
            .with_justify(self.justify_left)
            .with_full_res(self.full_resolution)
            .with_int_invert(self.int_active_low)
            .with_spi_3wire(self.spi_3wire)
    }

    /// `FIFO_CTL` value derived from the descriptor.
    pub fn fifo_control_register(&self) -> FifoControl {
        FifoControl::new()
            .with_samples(self.watermark & MAX_WATERMARK)
            .with_mode(self.fifo_mode)
    }

    /// `POWER_CTL` value derived from the descriptor, measurement disabled.
    pub fn power_control_register(&self) -> PowerControl {
        PowerControl::new()
            .with_wakeup(self.wakeup)
            .with_auto_sleep(self.auto_sleep)
            .with_link(self.link)
    }

    /// Encodes the descriptor into the attach-time register writes.
    ///
    /// Thresholds come first, then axis controls, rate, format and FIFO;
    /// `POWER_CTL` with the measure bit set is always the final entry.
    pub fn register_program(&self) -> RegisterProgram {
        let power = self.power_control_register().with_measure(true);
        RegisterProgram {
            writes: [
                (REG_THRESH_TAP, self.tap_threshold),
                (REG_DUR, self.tap_duration),
                (REG_LATENT, self.tap_latency),
                (REG_WINDOW, self.tap_window),
                (REG_THRESH_ACT, self.activity_threshold),
                (REG_THRESH_INACT, self.inactivity_threshold),
                (REG_TIME_INACT, self.inactivity_time),
                (REG_TAP_AXES, u8::from(self.tap_axes_register())),
                (REG_ACT_INACT_CTL, u8::from(self.act_inact_register())),
                (REG_THRESH_FF, self.free_fall_threshold),
                (REG_TIME_FF, self.free_fall_time),
                (REG_BW_RATE, u8::from(self.bw_rate_register())),
                (REG_DATA_FORMAT, u8::from(self.data_format_register())),
                (REG_FIFO_CTL, u8::from(self.fifo_control_register())),
                (REG_POWER_CTL, u8::from(power)),
            ],
        }
    }

    /// Decodes one programmed register back into the descriptor.
    ///
    /// Returns `false` when `register` is not part of the register program.
    /// Bits outside the descriptor (measure, sleep, self-test, FIFO trigger
    /// routing) are ignored.
    pub fn apply_register(&mut self, register: u8, value: u8) -> bool {
        match register {
            REG_THRESH_TAP => self.tap_threshold = value,
            REG_DUR => self.tap_duration = value,
            REG_LATENT => self.tap_latency = value,
            REG_WINDOW => self.tap_window = value,
            REG_THRESH_ACT => self.activity_threshold = value,
            REG_THRESH_INACT => self.inactivity_threshold = value,
            REG_TIME_INACT => self.inactivity_time = value,
            REG_THRESH_FF => self.free_fall_threshold = value,
            REG_TIME_FF => self.free_fall_time = value,
            REG_TAP_AXES => {
                let tap = TapAxes::from(value);
                self.tap_axes = AxisSet::from_flags(tap.tap_x(), tap.tap_y(), tap.tap_z());
                self.suppress_double_tap = tap.suppress();
            }
            REG_ACT_INACT_CTL => {
                let ctl = ActInactControl::from(value);
                self.activity_axes = AxisSet::from_flags(ctl.act_x(), ctl.act_y(), ctl.act_z());
                self.activity_ac_coupled = ctl.act_ac();
                self.inactivity_axes =
                    AxisSet::from_flags(ctl.inact_x(), ctl.inact_y(), ctl.inact_z());
                self.inactivity_ac_coupled = ctl.inact_ac();
            }
            REG_BW_RATE => {
                let bw = BwRate::from(value);
                self.odr = bw.rate();
                self.low_power = bw.low_power();
            }
            REG_DATA_FORMAT => {
                let format = DataFormat::from(value);
                self.range = format.range();
                self.justify_left = format.justify();
                self.full_resolution = format.full_res();
                self.int_active_low = format.int_invert();
                self.spi_3wire = format.spi_3wire();
            }
            REG_FIFO_CTL => {
                let fifo = FifoControl::from(value);
                self.fifo_mode = fifo.mode();
                self.watermark = fifo.samples();
            }
            REG_POWER_CTL => {
                let power = PowerControl::from(value);
                self.wakeup = power.wakeup();
                self.auto_sleep = power.auto_sleep();
                self.link = power.link();
            }
            _ => return false,
        }
        true
    }
}

/// Number of register writes issued while attaching.
pub const PROGRAM_LEN: usize = 15;

/// Ordered `(register, value)` writes produced by [`Config::register_program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterProgram {
    writes: [(u8, u8); PROGRAM_LEN],
}

impl RegisterProgram {
    /// Iterates the writes in issue order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.writes.iter().copied()
    }

    /// Value programmed into `register`, if it is part of the program.
    pub fn value_of(&self, register: u8) -> Option<u8> {
        self.iter()
            .find(|(address, _)| *address == register)
            .map(|(_, value)| value)
    }

    /// Register addresses in issue order.
    pub fn registers(&self) -> [u8; PROGRAM_LEN] {
        self.writes.map(|(register, _)| register)
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`DEFAULT_CONFIG`].
    pub fn new() -> Self {
        Self {
            config: DEFAULT_CONFIG,
        }
    }

    /// Sets tap threshold, duration, latency and window.
    pub fn tap_timing(mut self, threshold: u8, duration: u8, latency: u8, window: u8) -> Self {
        self.config.tap_threshold = threshold;
        self.config.tap_duration = duration;
        self.config.tap_latency = latency;
        self.config.tap_window = window;
        self
    }

    /// Selects the tap axes and double-tap suppression.
    pub fn tap_axes(mut self, axes: AxisSet, suppress_double_tap: bool) -> Self {
        self.config.tap_axes = axes;
        self.config.suppress_double_tap = suppress_double_tap;
        self
    }

    /// Selects the activity axes and coupling.
    pub fn activity_axes(mut self, axes: AxisSet, ac_coupled: bool) -> Self {
        self.config.activity_axes = axes;
        self.config.activity_ac_coupled = ac_coupled;
        self
    }

    /// Selects the inactivity axes and coupling.
    pub fn inactivity_axes(mut self, axes: AxisSet, ac_coupled: bool) -> Self {
        self.config.inactivity_axes = axes;
        self.config.inactivity_ac_coupled = ac_coupled;
        self
    }

    /// Sets activity threshold, inactivity threshold and inactivity time.
    pub fn activity(mut self, threshold: u8, inactivity_threshold: u8, inactivity_time: u8) -> Self {
        self.config.activity_threshold = threshold;
        self.config.inactivity_threshold = inactivity_threshold;
        self.config.inactivity_time = inactivity_time;
        self
    }

    /// Sets free-fall threshold and time.
    pub fn free_fall(mut self, threshold: u8, time: u8) -> Self {
        self.config.free_fall_threshold = threshold;
        self.config.free_fall_time = time;
        self
    }

    /// Overrides the output data rate.
    pub fn odr(mut self, odr: OutputDataRate) -> Self {
        self.config.odr = odr;
        self
    }

    /// Enables reduced power operation.
    pub fn low_power(mut self, low_power: bool) -> Self {
        self.config.low_power = low_power;
        self
    }

    /// Selects the g-range and resolution mode.
    pub fn range(mut self, range: Range, full_resolution: bool) -> Self {
        self.config.range = range;
        self.config.full_resolution = full_resolution;
        self
    }

    /// Selects MSB-aligned output.
    pub fn justify_left(mut self, justify_left: bool) -> Self {
        self.config.justify_left = justify_left;
        self
    }

    /// Selects active-low interrupt pins.
    pub fn int_active_low(mut self, active_low: bool) -> Self {
        self.config.int_active_low = active_low;
        self
    }

    /// Selects 3-wire SPI mode.
    pub fn spi_3wire(mut self, spi_3wire: bool) -> Self {
        self.config.spi_3wire = spi_3wire;
        self
    }

    /// Sets the event codes handed to the input consumer.
    pub fn events(mut self, events: EventMapping) -> Self {
        self.config.events = events;
        self
    }

    /// Sets the link, auto-sleep and sleep sampling options.
    pub fn power(mut self, link: bool, auto_sleep: bool, wakeup: WakeUpFrequency) -> Self {
        self.config.link = link;
        self.config.auto_sleep = auto_sleep;
        self.config.wakeup = wakeup;
        self
    }

    /// Sets FIFO mode and watermark.
    pub fn fifo(mut self, mode: FifoMode, watermark: u8) -> Self {
        self.config.fifo_mode = mode;
        self.config.watermark = watermark;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Watermark does not fit the 5-bit `FIFO_CTL.SAMPLES` field.
    WatermarkOutOfRange,
}
