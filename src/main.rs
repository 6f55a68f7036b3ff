#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;

use alarm_clock::display::{Frame, SegmentDisplay, SegmentPanel, DIGITS};
use alarm_clock::hold::TickCounter;
use alarm_clock::{Config, Controller};
use max7219::{DataError, MAX7219};
use rtic::app;

/// Sub-second tick shared by the timer task and the button scan.
static TICKS: TickCounter = TickCounter::new();

/// Idle-loop pause between button scans, about 1 ms at 125 MHz.
const POLL_DELAY_CYCLES: u32 = 125_000;

/// The MAX7219 as a single 4-digit 7-segment panel in no-decode mode.
pub struct Max7219Panel<C>(MAX7219<C>);

impl<C: max7219::connectors::Connector> SegmentPanel for Max7219Panel<C> {
    type Error = DataError;

    fn show(&mut self, frame: &Frame) -> Result<(), DataError> {
        let mut raw = [0u8; 8];
        raw[..DIGITS].copy_from_slice(frame);
        self.0.write_raw(0, &raw)
    }
}

#[app(device = rp_pico::hal::pac, peripherals = true)]
mod app {
    use super::*;
    use alarm_clock::alarm::Buzzer;
    use alarm_clock::input::{Buttons, DigitalInput};
    use embedded_hal::digital::v2::ToggleableOutputPin;
    use rp_pico::hal::{
        clocks::{init_clocks_and_plls, Clock},
        fugit::{ExtU32, RateExtU32},
        gpio::{
            bank0::{Gpio16, Gpio17, Gpio18, Gpio19, Gpio20, Gpio25},
            DynPinId, FunctionSioInput, FunctionSioOutput, FunctionSpi, Pin, PullDown, PullUp,
        },
        sio::Sio,
        spi::Spi,
        timer::{Alarm, Alarm0, Timer},
        watchdog::Watchdog,
    };

    type Spi0 = Spi<
        rp_pico::hal::spi::Enabled,
        rp_pico::hal::pac::SPI0,
        (
            Pin<Gpio19, FunctionSpi, PullDown>,
            Pin<Gpio16, FunctionSpi, PullDown>,
            Pin<Gpio18, FunctionSpi, PullDown>,
        ),
    >;
    type CsPin = Pin<Gpio17, FunctionSioOutput, PullDown>;
    type Panel = Max7219Panel<max7219::connectors::SpiConnectorSW<Spi0, CsPin>>;
    type Button = Pin<DynPinId, FunctionSioInput, PullUp>;
    type BuzzerPin = Pin<Gpio20, FunctionSioOutput, PullDown>;
    type ClockController = Controller<'static, SegmentDisplay<Panel>, Button, BuzzerPin>;

    const TICK_PERIOD_US: u32 = 1_000_000 / alarm_clock::config::TICKS_PER_SECOND_DEFAULT as u32;

    #[shared]
    struct Shared {
        controller: ClockController,
    }

    #[local]
    struct Local {
        led: Pin<Gpio25, FunctionSioOutput, PullDown>,
        alarm: Alarm0,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);
        let config = Config::default();

        let external_xtal_freq_hz = 12_000_000u32;
        let clocks = init_clocks_and_plls(
            external_xtal_freq_hz,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .expect("clock init failed");

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let led = pins.led.into_push_pull_output();
        let buzzer = Buzzer::new(pins.gpio20.into_push_pull_output());

        let button = |pin: Button| DigitalInput::active_low(pin);
        let buttons = Buttons::new(
            button(pins.gpio10.into_pull_up_input().into_dyn_pin()),
            button(pins.gpio11.into_pull_up_input().into_dyn_pin()),
            button(pins.gpio12.into_pull_up_input().into_dyn_pin()),
            button(pins.gpio13.into_pull_up_input().into_dyn_pin()),
            button(pins.gpio14.into_pull_up_input().into_dyn_pin()),
            button(pins.gpio15.into_pull_up_input().into_dyn_pin()),
            config.hold_seconds,
        );

        let mosi = pins.gpio19.into_function::<FunctionSpi>();
        let sck = pins.gpio18.into_function::<FunctionSpi>();
        let miso = pins.gpio16.into_function::<FunctionSpi>();
        let cs = pins.gpio17.into_push_pull_output();

        let spi = Spi::<_, _, _, 8>::new(pac.SPI0, (mosi, miso, sck));
        let spi = spi.init(
            &mut pac.RESETS,
            clocks.peripheral_clock.freq(),
            2_000_000u32.Hz(),
            &embedded_hal::spi::MODE_0,
        );

        let mut max7219 = MAX7219::from_spi_cs(1, spi, cs).expect("MAX7219 init failed");
        max7219.power_on().expect("MAX7219 power on failed");
        max7219.set_intensity(0, 0x4).ok();
        max7219.clear_display(0).ok();
        let display = SegmentDisplay::new(Max7219Panel(max7219), config.ticks_per_second);

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let mut alarm = timer.alarm_0().expect("alarm 0 already taken");
        alarm.schedule(TICK_PERIOD_US.micros()).ok();
        alarm.enable_interrupt();

        defmt::info!("alarm clock up, {} ticks/s", config.ticks_per_second);

        (
            Shared {
                controller: Controller::new(config, display, buttons, buzzer, &TICKS),
            },
            Local { led, alarm },
            init::Monotonics(),
        )
    }

    // Periodic refresh at `ticks_per_second`
    #[task(binds = TIMER_IRQ_0, priority = 1, shared = [controller], local = [alarm, led])]
    fn timer_tick(mut ctx: timer_tick::Context) {
        ctx.local.alarm.clear_interrupt();
        ctx.local.alarm.schedule(TICK_PERIOD_US.micros()).ok();

        ctx.shared.controller.lock(|c| c.on_tick());

        if TICKS.load() == 0 {
            ctx.local.led.toggle().ok();
        }
    }

    #[idle(shared = [controller])]
    fn idle(mut ctx: idle::Context) -> ! {
        loop {
            ctx.shared.controller.lock(|c| c.poll());
            cortex_m::asm::delay(POLL_DELAY_CYCLES);
        }
    }
}
