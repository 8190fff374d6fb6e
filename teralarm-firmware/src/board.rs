//! Pin map and peripheral wiring for the alarm clock board
//!
//! | Function        | GPIO | Peripheral        |
//! |-----------------|------|-------------------|
//! | I2C SDA / SCL   | 0/1  | I2C0 (LCD, DS3231)|
//! | Confirm button  | 2    |                   |
//! | Cancel button   | 3    |                   |
//! | Increment button| 4    |                   |
//! | Decrement button| 5    |                   |
//! | Red LED         | 6    |                   |
//! | Blue LED        | 7    |                   |
//! | Buzzer          | 8    | PWM slice 4 A     |
//! | Backlight       | 10   | PWM slice 5 A     |
//! | Light sensor    | 26   | ADC0              |

use core::cell::RefCell;

use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::gpio::{AnyPin, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::{Peri, Peripherals};
use embassy_time::Delay;
use embedded_hal_bus::i2c::RefCellDevice;
use static_cell::StaticCell;

use teralarm_core::HalBoard;
use teralarm_drivers::lcd::DEFAULT_ADDRESS;
use teralarm_drivers::{Ds3231, Hd44780};
use teralarm_hal_rp2040::{
    Backlight, Button, EmbassyClock, LightSensor, PwmBuzzer, Rp2040SettingsStore, StatusLed,
};

/// I2C bus clock, the PCF8574 backpack tops out at 100 kHz
pub const I2C_FREQUENCY_HZ: u32 = 100_000;

/// Address of the LCD's I2C backpack
pub const LCD_ADDRESS: u8 = DEFAULT_ADDRESS;

type I2cBus = I2c<'static, I2C0, i2c::Blocking>;
type I2cDevice = RefCellDevice<'static, I2cBus>;

/// Concrete board the firmware runs on
pub type Board = HalBoard<
    EmbassyClock,
    Button<'static>,
    LightSensor<'static>,
    Backlight<'static>,
    StatusLed<'static>,
    PwmBuzzer<'static>,
    Ds3231<I2cDevice>,
>;

/// Character LCD on the shared I2C bus
pub type Lcd = Hd44780<I2cDevice, Delay>;

/// Flash-backed settings store
pub type Store = Rp2040SettingsStore<'static>;

static I2C_BUS: StaticCell<RefCell<I2cBus>> = StaticCell::new();

/// Everything the interaction engine needs, built from the peripherals
pub struct Parts {
    pub board: Board,
    pub lcd: Lcd,
    pub store: Store,
}

impl Parts {
    pub fn new(p: Peripherals) -> Self {
        let mut i2c_config = i2c::Config::default();
        i2c_config.frequency = I2C_FREQUENCY_HZ;
        let bus: &'static RefCell<I2cBus> = I2C_BUS.init(RefCell::new(I2c::new_blocking(
            p.I2C0, p.PIN_1, p.PIN_0, i2c_config,
        )));

        let buttons = [
            Button::new(pin(p.PIN_2)),
            Button::new(pin(p.PIN_3)),
            Button::new(pin(p.PIN_4)),
            Button::new(pin(p.PIN_5)),
        ];
        let leds = [StatusLed::new(pin(p.PIN_6)), StatusLed::new(pin(p.PIN_7))];

        let buzzer = PwmBuzzer::new(Pwm::new_output_a(
            p.PWM_SLICE4,
            p.PIN_8,
            pwm::Config::default(),
        ));
        let backlight = Backlight::new(Pwm::new_output_a(
            p.PWM_SLICE5,
            p.PIN_10,
            pwm::Config::default(),
        ));

        let light = LightSensor::new(
            Adc::new_blocking(p.ADC, adc::Config::default()),
            Channel::new_pin(p.PIN_26, Pull::None),
        );

        let rtc = Ds3231::new(RefCellDevice::new(bus));
        let lcd = match Hd44780::new(RefCellDevice::new(bus), Delay, LCD_ADDRESS) {
            Ok(lcd) => lcd,
            Err(e) => defmt::panic!("LCD init failed: {:?}", e),
        };

        let store = Rp2040SettingsStore::new(p.FLASH, p.DMA_CH0);

        Self {
            board: HalBoard::new(
                EmbassyClock,
                buttons,
                light,
                backlight,
                leds,
                buzzer,
                rtc,
            ),
            lcd,
            store,
        }
    }
}

fn pin(p: Peri<'static, impl embassy_rp::gpio::Pin>) -> Peri<'static, AnyPin> {
    p.into()
}
